//! Images → one PDF.

use serde::{Deserialize, Serialize};

use fd_core::{new_identifier, sanitize_name, AssetId, ImageAsset, Result, WorkDirs};

use super::{or_default, require_items};
use crate::context::AppContext;

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ImagesPdfItem {
    pub id: String,
    /// Page position; pages are sorted ascending, ties keep submission order.
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct ImagesPdfRequest {
    #[serde(default)]
    pub items: Vec<ImagesPdfItem>,
    pub pdf_density: Option<i64>,
    pub pdf_quality: Option<i64>,
    /// Output file name; `.pdf` is appended when missing.
    pub out_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct ImagesPdfResponse {
    pub pdf_url: String,
    /// Number of pages written.
    pub count: usize,
}

/// Resolve the output file name from the client's request.
///
/// A blank or absent name yields `images_<YYYYmmdd_HHMMSS>_<8 hex>.pdf`.
pub fn output_name(out_name: Option<&str>) -> String {
    match out_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => {
            let name = sanitize_name(name);
            if name.to_ascii_lowercase().ends_with(".pdf") {
                name
            } else {
                format!("{name}.pdf")
            }
        }
        None => format!(
            "images_{}_{}.pdf",
            chrono::Local::now().format("%Y%m%d_%H%M%S"),
            new_identifier(4)
        ),
    }
}

/// Assemble the requested images, in page order, into a single PDF.
pub async fn images_to_pdf(ctx: &AppContext, req: ImagesPdfRequest) -> Result<ImagesPdfResponse> {
    require_items(&req.items)?;

    let mut items = req.items;
    items.sort_by_key(|item| item.order);

    let mut pages = Vec::with_capacity(items.len());
    for item in &items {
        let image = ctx.registry.resolve::<ImageAsset>(&AssetId::from(item.id.as_str()))?;
        pages.push(image.path.clone());
    }

    let defaults = ctx.defaults();
    let density = or_default(req.pdf_density, defaults.pdf_density);
    let quality = or_default(req.pdf_quality, defaults.pdf_quality);
    let output = ctx.dirs.pdf_path(&output_name(req.out_name.as_deref()));

    let pdf = ctx.toolkit.assemble_pdf(&pages, &output, density, quality).await?;
    tracing::info!(pages = pages.len(), output = %pdf.display(), "images assembled");

    Ok(ImagesPdfResponse {
        pdf_url: WorkDirs::pdf_url(&pdf),
        count: pages.len(),
    })
}
