//! End-to-end run: parser JSON in, rendered Play project files out.

use playgen::ir::{ApiIr, ContainerKind};
use playgen::render::{TeraRenderer, render_bundle};
use playgen::transform::shape::MULTIPART_FILE_TYPE;
use playgen::{Error, GenerationFlags, GeneratorOptions, Transformer};
use serde_json::json;

const ROUTES: &str = "{% for api in apis %}{% for op in api.operations %}\
{{ op.httpMethod }} {{ op.path }} controllers.{{ api.classname }}Controller.{{ op.operationId }}\n\
{% endfor %}{% endfor %}";

const SECURITY_UTILS: &str = "{% for m in authMethods %}\
{{ m.name }} {{ m.type }} {% if m.jwksUrl %}{{ m.jwksUrl }}{% else %}none{% endif %}\n\
{% endfor %}";

const CONTROLLER: &str = "class {{ classname }}Controller\n{% for op in operations %}\
{{ op.operationId }} {% if op.returnType %}{{ op.returnType }}{% else %}void{% endif %}\
{% if op.returnContainer %} in {{ op.returnContainer }}{% endif %}\
{% for p in op.formParams %} {{ p.baseName }}:{{ p.dataType }}{% endfor %}\
{% for m in op.authMethods %} auth={{ m.name }}[{% for s in m.scopes %}{{ s.name }}{% endfor %}]{% endfor %}\n\
{% endfor %}";

fn petstore_ir() -> ApiIr {
    serde_json::from_value(json!({
        "operations": [
            {
                "operationId": "findPetsByTags",
                "httpMethod": "GET",
                "path": "/pet/findByTags",
                "baseName": "pet",
                "returnType": "List<Pet>",
                "security": [{"scheme": "petstore_auth", "scopes": ["read:pets"]}]
            },
            {
                "operationId": "uploadFile",
                "httpMethod": "POST",
                "path": "/pet/{pet_id}/uploadImage",
                "baseName": "pet",
                "returnType": "ModelApiResponse",
                "allParams": [
                    {"baseName": "pet_id", "paramName": "petId", "dataType": "Long", "isPathParam": true},
                    {"baseName": "file", "paramName": "file", "dataType": "File", "isFormParam": true, "isFile": true}
                ],
                "formParams": [
                    {"baseName": "file", "paramName": "file", "dataType": "File", "isFormParam": true, "isFile": true}
                ]
            },
            {
                "operationId": "getInventory",
                "httpMethod": "GET",
                "path": "/store/inventory",
                "baseName": "store",
                "returnType": "Map<String, Integer>",
                "security": [{"scheme": "api_key"}]
            },
            {
                "operationId": "deleteOrder",
                "httpMethod": "DELETE",
                "path": "/store/order/{orderId}",
                "baseName": "store"
            }
        ],
        "securitySchemes": [
            {
                "name": "petstore_auth",
                "type": "oauth2",
                "flow": "implicit",
                "authorizationUrl": "https://auth.example.com/authorize",
                "scopes": [
                    {"name": "write:pets"},
                    {"name": "read:pets"}
                ],
                "vendorExtensions": {"x-jwksUrl": "https://auth.example.com/.well-known/jwks.json"}
            },
            {
                "name": "api_key",
                "type": "apiKey",
                "keyParamName": "api_key",
                "location": "header"
            }
        ],
        "document": {"openapi": "3.0.1", "info": {"title": "Petstore"}}
    }))
    .unwrap()
}

fn renderer(flags: &GenerationFlags) -> TeraRenderer {
    let plan = playgen::transform::ArtifactPlan::assemble(flags);
    let mut templates: Vec<(String, String)> = plan
        .supporting_files
        .iter()
        .map(|file| (file.template.to_string(), file.file_name.to_string()))
        .collect();
    for (id, source) in [
        ("routes.tera", ROUTES),
        ("securityApiUtils.tera", SECURITY_UTILS),
        ("openapi.tera", "{{ openapiJson }}"),
        ("newApiController.tera", CONTROLLER),
        ("newApi.tera", "class {{ classname }}ControllerImp"),
        ("newApiInterface.tera", "interface {{ classname }}ControllerImpInterface"),
    ] {
        templates.retain(|(existing, _)| existing != id);
        templates.push((id.to_string(), source.to_string()));
    }
    TeraRenderer::from_raw(templates).unwrap()
}

#[test]
fn test_transform_petstore() {
    let bundle = Transformer::new(GenerationFlags::default())
        .run(petstore_ir())
        .unwrap();

    let upload = &bundle.operations[1];
    assert_eq!(upload.path, "/pet/:petId/uploadImage");
    assert_eq!(upload.form_params[0].lock().data_type, MULTIPART_FILE_TYPE);
    // the form parameter is shared with allParams
    assert!(upload.form_params[0].ptr_eq(&upload.all_params[1]));
    assert_eq!(upload.all_params[0].lock().data_type, "Long");

    let inventory = &bundle.operations[2];
    assert_eq!(inventory.return_type.as_deref(), Some("Integer"));
    assert_eq!(inventory.return_container, Some(ContainerKind::Map));
    assert!(inventory.return_type_is_primitive);

    let delete = &bundle.operations[3];
    assert_eq!(delete.return_type, None);
    assert_eq!(delete.return_container, None);
    assert!(delete.return_type_is_primitive);

    let oauth = &bundle.security_schemes[0];
    assert_eq!(
        oauth.jwks_url.as_deref(),
        Some("https://auth.example.com/.well-known/jwks.json")
    );
    assert_eq!(oauth.token_introspect_url, None);
}

#[test]
fn test_render_petstore_project() {
    let flags = GenerationFlags::default();
    let bundle = Transformer::new(flags.clone()).run(petstore_ir()).unwrap();
    let rendered = render_bundle(&bundle, &renderer(&flags)).unwrap();

    let file = |path: &str| {
        rendered
            .iter()
            .find(|artifact| artifact.path == path)
            .map(|artifact| artifact.content.as_str())
            .unwrap_or_else(|| panic!("{path} was not rendered"))
    };

    assert_eq!(
        file("conf/routes"),
        "GET /pet/findByTags controllers.PetController.findPetsByTags\n\
         POST /pet/:petId/uploadImage controllers.PetController.uploadFile\n\
         GET /store/inventory controllers.StoreController.getInventory\n\
         DELETE /store/order/:orderId controllers.StoreController.deleteOrder\n"
    );

    assert_eq!(
        file("app/openapitools/SecurityAPIUtils.java"),
        "petstore_auth oauth2 https://auth.example.com/.well-known/jwks.json\n\
         api_key apiKey none\n"
    );

    assert_eq!(
        file("app/controllers/PetController.java"),
        format!(
            "class PetController\n\
             findPetsByTags Pet in List auth=petstore_auth[read:pets]\n\
             uploadFile ModelApiResponse file:{MULTIPART_FILE_TYPE}\n"
        )
    );
    assert_eq!(
        file("app/controllers/StoreController.java"),
        "class StoreController\n\
         getInventory Integer in Map auth=api_key[]\n\
         deleteOrder void\n"
    );
    assert_eq!(
        file("app/controllers/PetControllerImp.java"),
        "class PetControllerImp"
    );
    assert!(file("public/openapi.json").contains("\"title\": \"Petstore\""));
    assert_eq!(file("app/Module.java"), "Module.java");
}

#[test]
fn test_render_controller_only_without_extras() {
    let options: GeneratorOptions = serde_json::from_value(json!({
        "controllerOnly": "true",
        "handleExceptions": false,
        "wrapCalls": "false",
        "useSwaggerUI": false
    }))
    .unwrap();
    let flags = options.resolve();
    let bundle = Transformer::new(flags.clone()).run(petstore_ir()).unwrap();
    let rendered = render_bundle(&bundle, &renderer(&flags)).unwrap();

    let paths: Vec<&str> = rendered.iter().map(|a| a.path.as_str()).collect();
    assert!(paths.contains(&"app/controllers/PetController.java"));
    assert!(!paths.contains(&"app/Module.java"));
    assert!(!paths.contains(&"app/controllers/PetControllerImp.java"));
    assert!(!paths.contains(&"app/controllers/PetControllerImpInterface.java"));
    assert!(!paths.contains(&"app/openapitools/ErrorHandler.java"));
    assert!(!paths.contains(&"app/openapitools/ApiCall.java"));
    assert!(!paths.contains(&"public/openapi.json"));
    assert!(!paths.contains(&"app/controllers/ApiDocController.java"));
}

#[test]
fn test_malformed_route_stops_the_run() {
    let mut ir = petstore_ir();
    ir.operations[3].path = "/store/order/{orderId".into();

    let err = Transformer::new(GenerationFlags::default())
        .run(ir)
        .unwrap_err();
    match err {
        Error::MalformedPath {
            operation_id, path, ..
        } => {
            assert_eq!(operation_id, "deleteOrder");
            assert_eq!(path, "/store/order/{orderId");
        }
        other => panic!("unexpected error: {other}"),
    }
}
