use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentalField {
    PartNumber,
    PartDescription,
    RohsDate,
    RohsCertificateLink,
    ReachStatus,
    ReachDeclarationLink,
    IpcMaterialDeclarationLink,
    PbFree,
    HalogenFree,
    Series,
    DatasheetLink,
}

/// Output CSV columns, in file order.
pub const CSV_COLUMNS: [EnvironmentalField; 11] = [
    EnvironmentalField::PartNumber,
    EnvironmentalField::PartDescription,
    EnvironmentalField::PbFree,
    EnvironmentalField::RohsDate,
    EnvironmentalField::RohsCertificateLink,
    EnvironmentalField::ReachStatus,
    EnvironmentalField::ReachDeclarationLink,
    EnvironmentalField::IpcMaterialDeclarationLink,
    EnvironmentalField::HalogenFree,
    EnvironmentalField::Series,
    EnvironmentalField::DatasheetLink,
];

impl EnvironmentalField {
    pub fn key(&self) -> &'static str {
        match self {
            EnvironmentalField::PartNumber => "part_number",
            EnvironmentalField::PartDescription => "part_description",
            EnvironmentalField::RohsDate => "rohs_date",
            EnvironmentalField::RohsCertificateLink => "rohs_certificate_link",
            EnvironmentalField::ReachStatus => "reach_status",
            EnvironmentalField::ReachDeclarationLink => "reach_declaration_link",
            EnvironmentalField::IpcMaterialDeclarationLink => "ipc_material_declaration_link",
            EnvironmentalField::PbFree => "pb_free",
            EnvironmentalField::HalogenFree => "halogen_free",
            EnvironmentalField::Series => "series",
            EnvironmentalField::DatasheetLink => "datasheet_link",
        }
    }
}

impl fmt::Display for EnvironmentalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Fields scraped from one product page.
///
/// A field is either present with non-empty trimmed text or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnvironmentalRecord {
    fields: BTreeMap<EnvironmentalField, String>,
}

impl EnvironmentalRecord {
    /// Stores `value` trimmed, replacing any earlier value. A missing or
    /// blank value clears the field.
    pub(crate) fn insert(&mut self, field: EnvironmentalField, value: Option<String>) {
        match value.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(text) => {
                self.fields.insert(field, text.to_string());
            }
            None => {
                self.fields.remove(&field);
            }
        }
    }

    pub fn get(&self, field: EnvironmentalField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: EnvironmentalField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One line of the output CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    cells: Vec<(EnvironmentalField, Option<String>)>,
}

impl OutputRow {
    pub fn new(search_term: &str, record: Option<&EnvironmentalRecord>) -> Self {
        let cells = CSV_COLUMNS
            .iter()
            .map(|&field| {
                let scraped = record.and_then(|r| r.get(field)).map(str::to_string);
                let value = match field {
                    EnvironmentalField::PartNumber => {
                        scraped.or_else(|| Some(search_term.to_string()))
                    }
                    _ => scraped,
                };
                (field, value)
            })
            .collect();

        Self { cells }
    }

    pub fn get(&self, field: EnvironmentalField) -> Option<&str> {
        self.cells
            .iter()
            .find(|(f, _)| *f == field)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn part_number(&self) -> &str {
        self.get(EnvironmentalField::PartNumber).unwrap_or_default()
    }

    /// Cell values in column order, nulls as empty strings.
    pub fn to_record(&self) -> Vec<&str> {
        self.cells
            .iter()
            .map(|(_, value)| value.as_deref().unwrap_or(""))
            .collect()
    }

    pub fn header() -> Vec<&'static str> {
        CSV_COLUMNS.iter().map(EnvironmentalField::key).collect()
    }
}
