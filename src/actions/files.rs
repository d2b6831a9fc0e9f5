use crate::actions::{ActionContext, Messages};
use crate::backend::{BackendInvoker, BackendRequest};
use crate::domain::envelope::ApiEnvelope;
use crate::domain::file::{FileUpload, UploadedFile};

const UPLOAD: Messages = Messages::new("File uploaded successfully", "Failed to upload file");

/// Uploads a file as multipart form data, bounded by the configured deadline.
pub async fn upload_file<B>(
    ctx: &ActionContext<'_, B>,
    file: FileUpload,
) -> ApiEnvelope<UploadedFile>
where
    B: BackendInvoker + ?Sized,
{
    let deadline = ctx.settings().upload_timeout;
    ctx.run(UPLOAD, move || {
        Ok(BackendRequest::post("/files/upload")
            .multipart(file)
            .timeout(deadline))
    })
    .await
}
