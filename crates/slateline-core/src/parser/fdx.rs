//! # Final Draft (.fdx) Text Extraction
//!
//! Minimal extractor for the Final Draft XML dialect: each `<Paragraph>`
//! becomes one output line made of its concatenated `<Text>` runs. The
//! format is machine-written and well-formed in practice, so this is a
//! forward scan, not a general XML parser.
//!
//! With `import_tags` enabled, Final Draft tagging data (`<Tag Value="...">`)
//! is appended to its paragraph as `[[TAG: ...]]` markers so the harvester
//! can see manual breakdown work done in Final Draft.

use crate::types::BreakdownError;

/// Extract screenplay text from Final Draft XML.
pub fn extract_fdx_text(raw: &str, import_tags: bool) -> Result<String, BreakdownError> {
    if !raw.contains("<Paragraph") {
        return Err(BreakdownError::DeserializationError(
            "No <Paragraph> elements found; not a Final Draft file".to_string(),
        ));
    }

    let mut lines = Vec::new();
    let mut rest = raw;

    while let Some(start) = rest.find("<Paragraph") {
        let after_open = &rest[start..];
        let Some(end) = after_open.find("</Paragraph>") else {
            break;
        };
        let paragraph = &after_open[..end];

        let mut line = collect_inner_text(paragraph, "Text");
        if import_tags {
            for value in collect_attribute_values(paragraph, "Tag", "Value") {
                line.push_str(&format!(" [[TAG: {value}]]"));
            }
        }
        lines.push(line);

        rest = &after_open[end + "</Paragraph>".len()..];
    }

    Ok(lines.join("\n"))
}

/// Concatenate the text content of every `<tag>...</tag>` block.
fn collect_inner_text(fragment: &str, tag: &str) -> String {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    let mut out = String::new();
    let mut rest = fragment;

    while let Some(start) = rest.find(&open) {
        let after = &rest[start + open.len()..];
        // Skip self-closing and unterminated tags.
        let Some(gt) = after.find('>') else { break };
        if after[..gt].ends_with('/') {
            rest = &after[gt + 1..];
            continue;
        }
        let body = &after[gt + 1..];
        let Some(end) = body.find(&close) else { break };
        out.push_str(&unescape_xml(&body[..end]));
        rest = &body[end + close.len()..];
    }
    out
}

/// Collect the values of `attr` on every `<tag ...>` element.
fn collect_attribute_values(fragment: &str, tag: &str, attr: &str) -> Vec<String> {
    let open = format!("<{tag} ");
    let needle = format!("{attr}=\"");
    let mut values = Vec::new();
    let mut rest = fragment;

    while let Some(start) = rest.find(&open) {
        let after = &rest[start + open.len()..];
        let Some(gt) = after.find('>') else { break };
        let element = &after[..gt];
        if let Some(attr_start) = element.find(&needle) {
            let value = &element[attr_start + needle.len()..];
            if let Some(quote) = value.find('"') {
                values.push(unescape_xml(&value[..quote]));
            }
        }
        rest = &after[gt + 1..];
    }
    values
}

/// Decode the five predefined XML entities.
fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<FinalDraft DocumentType="Script">
  <Content>
    <Paragraph Type="Scene Heading">
      <Text>INT. BANK VAULT - DAY</Text>
    </Paragraph>
    <Paragraph Type="Action">
      <Text>Jax pries the vault door with a </Text><Text>crowbar</Text><Text>.</Text>
      <Tag Value="CROWBAR"/>
    </Paragraph>
    <Paragraph Type="Dialogue">
      <Text>He&apos;s got a gun!</Text>
    </Paragraph>
  </Content>
</FinalDraft>"#;

    #[test]
    fn extracts_one_line_per_paragraph() {
        let text = extract_fdx_text(SAMPLE, false).expect("extract");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "INT. BANK VAULT - DAY");
        assert_eq!(lines[1], "Jax pries the vault door with a crowbar.");
        assert_eq!(lines[2], "He's got a gun!");
    }

    #[test]
    fn imports_tags_when_requested() {
        let text = extract_fdx_text(SAMPLE, true).expect("extract");
        assert!(text.contains("[[TAG: CROWBAR]]"));
    }

    #[test]
    fn rejects_non_fdx_input() {
        let err = extract_fdx_text("just some prose", false).unwrap_err();
        assert!(matches!(err, BreakdownError::DeserializationError(_)));
    }

    #[test]
    fn unescapes_entities() {
        assert_eq!(unescape_xml("Tom &amp; Jerry &lt;3"), "Tom & Jerry <3");
    }
}
