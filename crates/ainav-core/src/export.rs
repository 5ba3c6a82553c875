use crate::{models::CatalogItem, Error, Result};
use std::path::Path;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
}

impl ExportFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
        }
    }
}

/// Writes a list of catalog items (usually the bookmarks view) to disk
pub struct Exporter;

impl Exporter {
    /// Export items to a file, picking the format from the extension
    pub fn export_to_file<P: AsRef<Path>>(items: &[&CatalogItem], path: P) -> Result<ExportFormat> {
        let path = path.as_ref();

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ExportFormat::from_extension)
            .ok_or_else(|| {
                Error::ConfigError(
                    "Could not determine export format from extension. Use .json, .csv, or .md"
                        .to_string(),
                )
            })?;

        Self::export_to_file_with_format(items, path, format)?;
        Ok(format)
    }

    pub fn export_to_file_with_format<P: AsRef<Path>>(
        items: &[&CatalogItem],
        path: P,
        format: ExportFormat,
    ) -> Result<()> {
        let content = Self::render(items, format)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn render(items: &[&CatalogItem], format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => Self::to_json(items),
            ExportFormat::Csv => Ok(Self::to_csv(items)),
            ExportFormat::Markdown => Ok(Self::to_markdown(items)),
        }
    }

    pub fn to_json(items: &[&CatalogItem]) -> Result<String> {
        Ok(serde_json::to_string_pretty(items)?)
    }

    pub fn to_csv(items: &[&CatalogItem]) -> String {
        let mut output = String::from("ID,Name,Category,Pricing,Featured,Tags,URL\n");

        for item in items {
            output.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                Self::escape_csv(&item.id),
                Self::escape_csv(&item.name),
                Self::escape_csv(&item.category),
                item.pricing.map(|p| p.label()).unwrap_or(""),
                item.is_featured(),
                Self::escape_csv(&item.tags.join(";")),
                Self::escape_csv(&item.url),
            ));
        }

        output
    }

    pub fn to_markdown(items: &[&CatalogItem]) -> String {
        let mut output = String::new();

        output.push_str("# Bookmarked AI Tools\n\n");
        output.push_str(&format!(
            "Exported {} tools on {}\n\n",
            items.len(),
            chrono::Utc::now().format("%Y-%m-%d")
        ));

        for item in items {
            output.push_str(&format!("## [{}]({})\n\n", item.name, item.url));
            output.push_str(&format!("**Category:** {}", item.category));
            if let Some(pricing) = item.pricing {
                output.push_str(&format!(" | **Pricing:** {}", pricing));
            }
            output.push_str("\n\n");
            output.push_str(&format!("{}\n\n", item.description));

            if !item.tags.is_empty() {
                let tags: Vec<String> = item.tags.iter().map(|t| format!("`{}`", t)).collect();
                output.push_str(&format!("Tags: {}\n\n", tags.join(" ")));
            }
        }

        output
    }

    fn escape_csv(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}
