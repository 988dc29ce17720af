// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Multipart uploads and stored file serving.

use aquahr_api::{
    AttachDocumentsRequest, attach_employee_documents, get_employee, get_site, set_site_image,
};
use aquahr_domain::{Employee, Site};
use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Path, State as AxumState},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::{debug, info, warn};

use super::AppState;
use crate::error::HttpError;
use crate::live::LiveEvent;
use crate::uploads::{UploadCategory, UploadStore};

/// Document slots an employee upload may fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentSlot {
    Cv,
    IdDocument,
    Photo,
}

impl DocumentSlot {
    fn from_field(name: &str) -> Option<Self> {
        match name {
            "cv" => Some(Self::Cv),
            "id_document" => Some(Self::IdDocument),
            "photo" => Some(Self::Photo),
            _ => None,
        }
    }

    fn url_of(self, employee: &Employee) -> Option<&str> {
        match self {
            Self::Cv => employee.cv_url.as_deref(),
            Self::IdDocument => employee.id_document_url.as_deref(),
            Self::Photo => employee.photo_url.as_deref(),
        }
    }

    fn set(self, request: &mut AttachDocumentsRequest, url: String) {
        match self {
            Self::Cv => request.cv_url = Some(url),
            Self::IdDocument => request.id_document_url = Some(url),
            Self::Photo => request.photo_url = Some(url),
        }
    }
}

/// A multipart file that passed validation but is not yet on disk.
struct PendingFile<K> {
    key: K,
    file_name: String,
    bytes: Bytes,
}

/// Deletes stored files, logging any that cannot be removed.
async fn discard(uploads: &UploadStore, urls: &[String]) {
    for url in urls {
        if let Err(err) = uploads.remove(url).await {
            warn!(url = %url, error = %err, "Could not remove upload");
        }
    }
}

/// Writes every pending file. If one write fails the files already
/// written are removed before the error is returned.
async fn store_all<K: Copy>(
    uploads: &UploadStore,
    category: UploadCategory,
    owner_id: i64,
    pending: &[PendingFile<K>],
) -> Result<Vec<(K, String)>, HttpError> {
    let mut stored: Vec<(K, String)> = Vec::with_capacity(pending.len());
    for file in pending {
        match uploads
            .store(category, owner_id, &file.file_name, &file.bytes)
            .await
        {
            Ok(upload) => {
                debug!(path = %upload.relative_path, "Upload written");
                stored.push((file.key, upload.url));
            }
            Err(err) => {
                let written: Vec<String> = stored.into_iter().map(|(_, url)| url).collect();
                discard(uploads, &written).await;
                return Err(err.into());
            }
        }
    }
    Ok(stored)
}

/// Handler for POST `/employees/{id}/documents`.
///
/// Accepts any of the multipart fields `cv`, `id_document` and `photo`.
/// Every file is validated before any is written. Only the documents sent
/// are replaced, and the files they replace are deleted.
pub(super) async fn handle_upload_employee_documents(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<Employee>, HttpError> {
    info!(employee_id, "Handling upload_employee_documents request");

    let mut persistence = app_state.persistence.lock().await;
    let previous: Employee = get_employee(&mut persistence, employee_id)?;
    drop(persistence);

    let mut pending: Vec<PendingFile<DocumentSlot>> = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let field_name: String = field.name().unwrap_or_default().to_string();
        let Some(slot) = DocumentSlot::from_field(&field_name) else {
            warn!(field = %field_name, "Ignoring unexpected upload field");
            continue;
        };

        let file_name: String = field.file_name().unwrap_or(&field_name).to_string();
        let bytes: Bytes = field.bytes().await?;
        app_state.uploads.check(&file_name, &bytes)?;
        pending.retain(|file| file.key != slot);
        pending.push(PendingFile {
            key: slot,
            file_name,
            bytes,
        });
    }

    let stored: Vec<(DocumentSlot, String)> = store_all(
        &app_state.uploads,
        UploadCategory::EmployeeDocuments,
        employee_id,
        &pending,
    )
    .await?;

    let mut request: AttachDocumentsRequest = AttachDocumentsRequest::default();
    let mut replaced: Vec<String> = Vec::new();
    for (slot, url) in &stored {
        slot.set(&mut request, url.clone());
        if let Some(old_url) = slot.url_of(&previous) {
            replaced.push(old_url.to_string());
        }
    }

    let mut persistence = app_state.persistence.lock().await;
    let attached = attach_employee_documents(&mut persistence, employee_id, &request);
    drop(persistence);

    let employee: Employee = match attached {
        Ok(employee) => employee,
        Err(err) => {
            let written: Vec<String> = stored.into_iter().map(|(_, url)| url).collect();
            discard(&app_state.uploads, &written).await;
            return Err(err.into());
        }
    };
    discard(&app_state.uploads, &replaced).await;

    app_state.broadcaster.broadcast(&LiveEvent::EmployeeUpdated {
        employee: employee.clone(),
    });

    Ok(Json(employee))
}

/// Handler for POST `/sites/{id}/image`.
///
/// Expects a single multipart field named `image`. The previous image, if
/// any, is deleted once the new one is recorded.
pub(super) async fn handle_upload_site_image(
    AxumState(app_state): AxumState<AppState>,
    Path(site_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<Site>, HttpError> {
    info!(site_id, "Handling upload_site_image request");

    let mut persistence = app_state.persistence.lock().await;
    let previous: Site = get_site(&mut persistence, site_id)?;
    drop(persistence);

    let mut pending: Vec<PendingFile<()>> = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            warn!(field = ?field.name(), "Ignoring unexpected upload field");
            continue;
        }

        let file_name: String = field.file_name().unwrap_or("image").to_string();
        let bytes: Bytes = field.bytes().await?;
        app_state.uploads.check(&file_name, &bytes)?;
        pending.clear();
        pending.push(PendingFile {
            key: (),
            file_name,
            bytes,
        });
    }

    if pending.is_empty() {
        return Err(HttpError::bad_request("Missing multipart field 'image'"));
    }

    let mut stored: Vec<((), String)> = store_all(
        &app_state.uploads,
        UploadCategory::SiteImages,
        site_id,
        &pending,
    )
    .await?;
    let Some(((), image_url)) = stored.pop() else {
        return Err(HttpError::bad_request("Missing multipart field 'image'"));
    };

    let mut persistence = app_state.persistence.lock().await;
    let updated = set_site_image(&mut persistence, site_id, &image_url);
    drop(persistence);

    let site: Site = match updated {
        Ok(site) => site,
        Err(err) => {
            discard(&app_state.uploads, &[image_url]).await;
            return Err(err.into());
        }
    };
    if let Some(old_url) = previous.image_url {
        discard(&app_state.uploads, &[old_url]).await;
    }

    app_state
        .broadcaster
        .broadcast(&LiveEvent::SiteUpdated { site: site.clone() });

    Ok(Json(site))
}

/// Handler for GET `/uploads/{*path}`.
pub(super) async fn handle_get_upload(
    AxumState(app_state): AxumState<AppState>,
    Path(path): Path<String>,
) -> Result<Response, HttpError> {
    let (bytes, content_type) = app_state.uploads.read(&path).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}
