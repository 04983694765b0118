use anyhow::{Context, Result};

use crate::domain::entities::document::Document;
use crate::domain::entities::save::SaveOptions;
use crate::infra::codec::encode::encode;
use crate::infra::codec::sniff::directive_line;
use crate::infra::import::csv::delimiter_byte;

/// Renders the document as delimited text in header order with every field
/// quoted.
pub fn serialize_text(document: &Document, options: &SaveOptions) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter_byte(options.delimiter)?)
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    let headers = document.headers();
    writer
        .write_record(headers)
        .context("failed to write csv header")?;
    for row in document.rows() {
        writer
            .write_record(row.ordered_values(headers))
            .with_context(|| format!("failed to write csv row {}", row.row_id()))?;
    }

    let body = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to flush csv writer: {}", err.error()))?;
    let body = String::from_utf8(body).context("csv writer produced invalid utf-8")?;

    if options.include_sep_directive {
        Ok(format!("{}{body}", directive_line(options.delimiter)))
    } else {
        Ok(body)
    }
}

pub fn serialize(document: &Document, options: &SaveOptions) -> Result<Vec<u8>> {
    let text = serialize_text(document, options)?;
    Ok(encode(&text, options.include_bom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::document::RowData;

    fn document() -> Document {
        let mut document = Document::new();
        let row: RowData = [
            ("a".to_string(), "1,2".to_string()),
            ("b".to_string(), "say \"hi\"".to_string()),
        ]
        .into_iter()
        .collect();
        document.load(vec!["a".to_string(), "b".to_string()], vec![row], ',');
        document
    }

    #[test]
    fn quotes_every_field_in_header_order() {
        let mut document = document();
        document.move_column(1, 0).expect("move should succeed");

        let text = serialize_text(&document, &SaveOptions::for_delimiter(',', false))
            .expect("serialize should succeed");

        assert_eq!(text, "\"b\",\"a\"\r\n\"say \"\"hi\"\"\",\"1,2\"\r\n");
    }

    #[test]
    fn sep_directive_and_bom_are_prepended() {
        let options = SaveOptions {
            delimiter: ';',
            include_sep_directive: true,
            include_bom: true,
        };

        let bytes = serialize(&document(), &options).expect("serialize should succeed");

        assert!(bytes.starts_with(&[0xEF, 0xBB, 0xBF]));
        let text = String::from_utf8(bytes[3..].to_vec()).expect("utf-8 output");
        assert!(text.starts_with("sep=;\n\"a\";\"b\"\r\n"));
    }

    #[test]
    fn empty_document_writes_header_only() {
        let mut document = Document::new();
        document.load(vec!["only".to_string()], Vec::new(), ',');

        let text = serialize_text(&document, &SaveOptions::for_delimiter(',', false))
            .expect("serialize should succeed");

        assert_eq!(text, "\"only\"\r\n");
    }
}
