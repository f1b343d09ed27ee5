use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use std::fs;
use std::path::Path;
use vqpix_kernel::codec::{self, Header};

/// Header fields plus the sizes derived from them.
#[derive(Debug, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub header: Header,
    pub vector_count: usize,
    pub labels_per_word: usize,
    pub label_words: usize,
    pub encoded_len: usize,
    pub file_len: u64,
}

impl Report {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let header = codec::read_header_file(path).with_context(|| format!("failed to read {}", path.display()))?;
        let file_len = fs::metadata(path)
            .with_context(|| format!("failed to stat {}", path.display()))?
            .len();
        Ok(Self {
            header,
            vector_count: header.vector_count(),
            labels_per_word: header.labels_per_word(),
            label_words: header.label_words(),
            encoded_len: header.encoded_len(),
            file_len,
        })
    }

    fn size_status(&self) -> &'static str {
        match (self.file_len as usize).cmp(&self.encoded_len) {
            std::cmp::Ordering::Equal => "OK",
            std::cmp::Ordering::Less => "TRUNCATED",
            std::cmp::Ordering::Greater => "TRAILING",
        }
    }

    fn table(&self) -> Table {
        let h = &self.header;
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Field", "Value"]);

        table.add_row(vec!["Image".to_string(), format!("{}x{}", h.width, h.height)]);
        table.add_row(vec!["Tile".to_string(), format!("{}x{} ({} bytes)", h.tile_width, h.tile_height, h.tile_bytes)]);
        table.add_row(vec!["Codebook".to_string(), format!("k = {}, {} bytes", h.k, h.codebook_bytes())]);
        table.add_row(vec!["Label bits".to_string(), h.id_bits.to_string()]);
        table.add_row(vec![
            "Labels".to_string(),
            format!("{} in {} words ({} per word)", self.vector_count, self.label_words, self.labels_per_word),
        ]);
        table.add_row(vec![
            "Size".to_string(),
            format!("{} of {} bytes, {}", self.file_len, self.encoded_len, self.size_status()),
        ]);
        table
    }
}

pub fn run(path: &Path, json: bool) -> anyhow::Result<()> {
    let report = Report::load(path)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n{}", path.display());
        println!("{}", report.table());
    }
    Ok(())
}
