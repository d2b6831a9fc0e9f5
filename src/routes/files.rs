use actix_multipart::form::MultipartForm;
use actix_web::{Responder, post, web};

use crate::actions::errors::ActionError;
use crate::actions::{ActionSettings, files, normalizer};
use crate::domain::envelope::ApiEnvelope;
use crate::domain::file::UploadedFile;
use crate::domain::session::Session;
use crate::forms::upload::UploadForm;
use crate::routes::{SharedBackend, context, respond};
use crate::session::CurrentSession;

const UPLOAD_FAILED: &str = "Failed to upload file";

#[post("/files/upload")]
pub async fn upload_file(
    MultipartForm(form): MultipartForm<UploadForm>,
    session: CurrentSession,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
) -> impl Responder {
    // Anonymous callers get the login envelope whatever they uploaded.
    if session.session().and_then(Session::principal).is_none() {
        return respond(normalizer::failure::<UploadedFile>(
            &ActionError::Unauthenticated,
            UPLOAD_FAILED,
            settings.sanitizer,
        ));
    }
    let upload = match form.into_upload() {
        Ok(upload) => upload,
        Err(e) => {
            log::warn!("Rejected upload: {e}");
            return respond(ApiEnvelope::<UploadedFile>::failure(
                UPLOAD_FAILED,
                settings.sanitizer.sanitize(&e.to_string()),
            ));
        }
    };
    let ctx = context(&backend, &session, &settings);
    respond(files::upload_file(&ctx, upload).await)
}
