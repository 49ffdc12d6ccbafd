use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{debug, info};

use crate::error::CatalogError;

/// The reference skill list, read once from a spreadsheet column.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    source: PathBuf,
    skills: Vec<String>,
}

impl SkillCatalog {
    /// Reads `column` (matched against the trimmed header row) from `sheet`,
    /// or from the first sheet when `sheet` is `None`.
    pub fn load(
        path: impl AsRef<Path>,
        sheet: Option<&str>,
        column: &str,
    ) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        info!(path = %path.display(), column = column, "Loading skill catalog");

        let mut workbook = open_workbook_auto(path).map_err(|source| CatalogError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let range = match sheet {
            Some(name) => {
                if !workbook.sheet_names().iter().any(|n| n == name) {
                    return Err(CatalogError::SheetMissing {
                        path: path.to_path_buf(),
                        sheet: name.to_string(),
                    });
                }
                workbook
                    .worksheet_range(name)
                    .map_err(|source| CatalogError::Open {
                        path: path.to_path_buf(),
                        source,
                    })?
            }
            None => workbook
                .worksheet_range_at(0)
                .ok_or_else(|| CatalogError::SheetMissing {
                    path: path.to_path_buf(),
                    sheet: "first sheet".to_string(),
                })?
                .map_err(|source| CatalogError::Open {
                    path: path.to_path_buf(),
                    source,
                })?,
        };

        let mut rows = range.rows();
        let header = rows.next().ok_or_else(|| CatalogError::EmptySheet {
            path: path.to_path_buf(),
        })?;

        let index = header
            .iter()
            .position(|cell| cell_text(cell).as_deref() == Some(column.trim()))
            .ok_or_else(|| CatalogError::ColumnMissing {
                path: path.to_path_buf(),
                column: column.to_string(),
            })?;

        let skills: Vec<String> = rows
            .filter_map(|row| row.get(index).and_then(cell_text))
            .collect();

        debug!(column_index = index, "Skill column located");
        info!(skills = skills.len(), "Skill catalog loaded");

        Ok(Self {
            source: path.to_path_buf(),
            skills,
        })
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn into_skills(self) -> Vec<String> {
        self.skills
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Trimmed text of a cell, or `None` for blank, error, and date cells.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    fn write_workbook(dir: &TempDir, sheet: &str, rows: &[&[&str]]) -> PathBuf {
        let path = dir.path().join("skills.xlsx");
        let mut workbook = Workbook::new();
        {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet).unwrap();
            for (r, row) in rows.iter().enumerate() {
                for (c, value) in row.iter().enumerate() {
                    if !value.is_empty() {
                        worksheet.write_string(r as u32, c as u16, *value).unwrap();
                    }
                }
            }
        }
        workbook.save(&path).unwrap();
        path
    }

    #[test]
    fn test_loads_trimmed_non_empty_cells() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(
            &dir,
            "Sheet1",
            &[
                &["Commodity Title", "Example"],
                &["Languages", "  Python "],
                &["Containers", ""],
                &["Containers", "Docker"],
                &["Whitespace", "   "],
                &["Orchestration", "Kubernetes"],
            ],
        );

        let catalog = SkillCatalog::load(&path, None, "Example").unwrap();
        assert_eq!(catalog.skills(), &["Python", "Docker", "Kubernetes"]);
        assert_eq!(catalog.source(), path.as_path());
    }

    #[test]
    fn test_named_sheet() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(&dir, "Tech", &[&["Example"], &["Rust"]]);

        let catalog = SkillCatalog::load(&path, Some("Tech"), "Example").unwrap();
        assert_eq!(catalog.into_skills(), vec!["Rust".to_string()]);

        let err = SkillCatalog::load(&path, Some("Missing"), "Example").unwrap_err();
        assert!(matches!(err, CatalogError::SheetMissing { .. }));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_workbook(&dir, "Sheet1", &[&["Skill"], &["Rust"]]);

        let err = SkillCatalog::load(&path, None, "Example").unwrap_err();
        assert!(matches!(err, CatalogError::ColumnMissing { ref column, .. } if column == "Example"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = SkillCatalog::load(dir.path().join("absent.xlsx"), None, "Example").unwrap_err();
        assert!(matches!(err, CatalogError::Open { .. }));
        assert!(err.to_string().contains("absent.xlsx"));
    }

    #[test]
    fn test_numeric_cells_render_as_text() {
        assert_eq!(cell_text(&Data::Float(365.0)), Some("365".to_string()));
        assert_eq!(cell_text(&Data::Float(2.5)), Some("2.5".to_string()));
        assert_eq!(cell_text(&Data::Int(7)), Some("7".to_string()));
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String("  ".to_string())), None);
    }
}
