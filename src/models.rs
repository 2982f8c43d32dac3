use clap::ValueEnum;

use crate::constants::{FILE_NAME_COLUMN, SKU_COLUMN, TAG_SEPARATOR};

/// One language's worth of fields in the model reply and the spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageSlot {
    pub description_field: &'static str,
    pub tags_field: &'static str,
    pub description_column: &'static str,
    pub tags_column: &'static str,
}

const BILINGUAL_SLOTS: [LanguageSlot; 2] = [
    LanguageSlot {
        description_field: "description_en",
        tags_field: "tags_en",
        description_column: "description_en",
        tags_column: "tags_en",
    },
    LanguageSlot {
        description_field: "description_th",
        tags_field: "tags_th",
        description_column: "description_th",
        tags_column: "tags_th",
    },
];

const MONOLINGUAL_SLOTS: [LanguageSlot; 1] = [LanguageSlot {
    description_field: "description",
    tags_field: "tags",
    description_column: "description",
    tags_column: "tag",
}];

/// Selects the prompt and the reply/table schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SchemaVariant {
    /// English and Thai descriptions and tags.
    #[default]
    Bilingual,
    /// A single English description and tag list.
    Monolingual,
}

impl SchemaVariant {
    pub fn slots(self) -> &'static [LanguageSlot] {
        match self {
            SchemaVariant::Bilingual => &BILINGUAL_SLOTS,
            SchemaVariant::Monolingual => &MONOLINGUAL_SLOTS,
        }
    }

    /// File name, SKU, every description column, then every tags column.
    pub fn columns(self) -> Vec<&'static str> {
        let slots = self.slots();
        let mut columns = vec![FILE_NAME_COLUMN, SKU_COLUMN];
        columns.extend(slots.iter().map(|slot| slot.description_column));
        columns.extend(slots.iter().map(|slot| slot.tags_column));
        columns
    }
}

/// Validated reply for one image. `descriptions[i]` and `tags[i]` belong to `slots()[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub descriptions: Vec<String>,
    pub tags: Vec<Vec<String>>,
}

/// One output line, values in `SchemaVariant::columns` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub variant: SchemaVariant,
    pub values: Vec<String>,
}

impl Row {
    pub fn new(
        variant: SchemaVariant,
        file_name: impl Into<String>,
        sku: impl Into<String>,
        analysis: AnalysisResult,
    ) -> Self {
        let AnalysisResult { descriptions, tags } = analysis;
        let mut values = vec![file_name.into(), sku.into()];
        values.extend(descriptions);
        values.extend(tags.iter().map(|list| list.join(TAG_SEPARATOR)));
        Self { variant, values }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.variant
            .columns()
            .iter()
            .position(|name| *name == column)
            .and_then(|index| self.values.get(index))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub output_path: std::path::PathBuf,
}
