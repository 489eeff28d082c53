//! Artifact selection driven by generation flags.
//!
//! [`ArtifactPlan::assemble`] is a pure function of [`GenerationFlags`]. It
//! lists the supporting files rendered once per run, and the API templates
//! rendered once per API class.

use std::fmt;

use serde::Serialize;

use crate::core::config::GenerationFlags;

/// A template rendered once per run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportingFile {
    pub template: &'static str,
    /// Destination folder relative to the output root; empty for the root
    pub folder: String,
    pub file_name: &'static str,
}

impl SupportingFile {
    fn new(template: &'static str, folder: impl Into<String>, file_name: &'static str) -> Self {
        Self {
            template,
            folder: folder.into(),
            file_name,
        }
    }

    /// Destination path relative to the output root
    pub fn destination(&self) -> String {
        if self.folder.is_empty() {
            self.file_name.to_string()
        } else {
            format!("{}/{}", self.folder, self.file_name)
        }
    }
}

/// What an API template produces for each API class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ApiArtifact {
    /// Route-facing controller
    Controller,
    /// Implementation stub the user fills in
    Implementation,
    /// Interface implemented by the stub
    Interface,
}

impl ApiArtifact {
    pub fn template(&self) -> &'static str {
        match self {
            Self::Controller => "newApiController.tera",
            Self::Implementation => "newApi.tera",
            Self::Interface => "newApiInterface.tera",
        }
    }

    /// Appended to the API class name to form the output file name
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Controller => "Controller.java",
            Self::Implementation => "ControllerImp.java",
            Self::Interface => "ControllerImpInterface.java",
        }
    }
}

impl fmt::Display for ApiArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.template())
    }
}

/// One resolved template-to-output binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactBinding {
    pub template: &'static str,
    pub destination: String,
    /// API class this binding renders, for per-class templates
    pub api_class: Option<String>,
}

/// Everything the renderer must produce for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactPlan {
    pub supporting_files: Vec<SupportingFile>,
    pub api_artifacts: Vec<ApiArtifact>,
    /// Folder the per-class files land in
    pub api_folder: String,
}

impl ArtifactPlan {
    /// Compute the plan for a set of flags.
    ///
    /// Interface artifacts are only produced for full (not controller-only)
    /// generation.
    pub fn assemble(flags: &GenerationFlags) -> Self {
        let with_interfaces = !flags.controller_only && flags.use_interfaces;
        let api_folder = format!("app/{}", flags.api_package.replace('.', "/"));

        let supporting_files = [
            Some(SupportingFile::new("README.tera", "", "README")),
            Some(SupportingFile::new("LICENSE.tera", "", "LICENSE")),
            Some(SupportingFile::new("build.tera", "", "build.sbt")),
            Some(SupportingFile::new("buildproperties.tera", "project", "build.properties")),
            Some(SupportingFile::new("plugins.tera", "project", "plugins.sbt")),
            Some(SupportingFile::new("logback.tera", "conf", "logback.xml")),
            Some(SupportingFile::new("application.tera", "conf", "application.conf")),
            Some(SupportingFile::new("routes.tera", "conf", "routes")),
            with_interfaces.then(|| SupportingFile::new("module.tera", "app", "Module.java")),
            Some(SupportingFile::new("openapiUtils.tera", "app/openapitools", "OpenAPIUtils.java")),
            Some(SupportingFile::new(
                "securityApiUtils.tera",
                "app/openapitools",
                "SecurityAPIUtils.java",
            )),
            flags.handle_exceptions.then(|| {
                SupportingFile::new("errorHandler.tera", "app/openapitools", "ErrorHandler.java")
            }),
            flags
                .wrap_calls
                .then(|| SupportingFile::new("apiCall.tera", "app/openapitools", "ApiCall.java")),
            flags
                .use_swagger_ui
                .then(|| SupportingFile::new("openapi.tera", "public", "openapi.json")),
            flags.use_swagger_ui.then(|| {
                SupportingFile::new("apiDocController.tera", api_folder.clone(), "ApiDocController.java")
            }),
        ]
        .into_iter()
        .flatten()
        .collect();

        let api_artifacts = [
            Some(ApiArtifact::Controller),
            (!flags.controller_only).then_some(ApiArtifact::Implementation),
            with_interfaces.then_some(ApiArtifact::Interface),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self {
            supporting_files,
            api_artifacts,
            api_folder,
        }
    }

    pub fn has_supporting_file(&self, template: &str) -> bool {
        self.supporting_files.iter().any(|f| f.template == template)
    }

    pub fn has_api_artifact(&self, artifact: ApiArtifact) -> bool {
        self.api_artifacts.contains(&artifact)
    }

    /// Destination of one API artifact for one API class
    pub fn api_destination(&self, artifact: ApiArtifact, api_class: &str) -> String {
        format!("{}/{}{}", self.api_folder, api_class, artifact.suffix())
    }

    /// Ordered bindings: supporting files first, then each API class's files.
    pub fn bindings<S: AsRef<str>>(&self, api_classes: &[S]) -> Vec<ArtifactBinding> {
        let supporting = self.supporting_files.iter().map(|file| ArtifactBinding {
            template: file.template,
            destination: file.destination(),
            api_class: None,
        });

        let per_class = api_classes.iter().flat_map(|class| {
            let class = class.as_ref();
            self.api_artifacts.iter().map(move |artifact| ArtifactBinding {
                template: artifact.template(),
                destination: self.api_destination(*artifact, class),
                api_class: Some(class.to_string()),
            })
        });

        supporting.chain(per_class).collect()
    }
}
