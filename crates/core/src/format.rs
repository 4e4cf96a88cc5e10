use crate::{report::Report, types::SourceInfo};

fn rule() -> String {
    "=".repeat(50)
}

fn push_heading(output: &mut String, title: &str) {
    output.push_str(&format!("{}\n{}\n{}\n\n", rule(), title, rule()));
}

fn numbered(points: &[String]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, point)| format!("{}. {}", i + 1, point))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line description of the source, e.g. `Source: YouTube | Video ID: abc`
pub fn format_source(source: &SourceInfo) -> String {
    match source {
        SourceInfo::YouTube { video_id, .. } => {
            format!("Source: {} | Video ID: {}", source.kind(), video_id)
        }
        SourceInfo::File { filename, .. } => {
            format!("Source: {} | File: {}", source.kind(), filename)
        }
        SourceInfo::Text { .. } => format!("Source: {}", source.kind()),
    }
}

/// Format the complete notes: statistics, final summary, key points, chunk
/// summaries and the original text.
pub fn format_full_notes(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("YouTube to Notes - Complete Summary\n");
    output.push_str(&format!("{}\n\n", rule()));

    output.push_str(&format!("SOURCE: {}\n", report.source.kind()));
    output.push_str(&format!("ORIGINAL LENGTH: {} words\n", report.original_words));
    output.push_str(&format!("SUMMARY LENGTH: {} words\n", report.summary_words));
    output.push_str(&format!("COMPRESSION: {:.1}%\n\n", report.compression_percent));

    push_heading(&mut output, "FINAL SUMMARY");
    output.push_str(&report.final_summary);
    output.push_str("\n\n");

    push_heading(&mut output, "KEY POINTS");
    output.push_str(&numbered(&report.key_points));
    output.push_str("\n\n");

    push_heading(&mut output, "CHUNK SUMMARIES");
    let chunks = report
        .chunk_summaries
        .iter()
        .enumerate()
        .map(|(i, summary)| format!("[Chunk {}]\n{}", i + 1, summary))
        .collect::<Vec<_>>()
        .join("\n\n");
    output.push_str(&chunks);
    output.push_str("\n\n");

    push_heading(&mut output, "ORIGINAL TEXT");
    output.push_str(&report.original_text);
    output.push('\n');

    output
}

/// Format the final summary and key points only
pub fn format_summary_only(report: &Report) -> String {
    format!(
        "SUMMARY\n\n{}\n\nKEY POINTS:\n{}",
        report.final_summary,
        numbered(&report.key_points)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> Report {
        Report {
            source: SourceInfo::YouTube {
                url: "https://youtu.be/abc".to_string(),
                video_id: "abc".to_string(),
                segments: 3,
            },
            original_words: 10,
            summary_words: 4,
            compression_percent: 60.0,
            key_points: vec!["First.".to_string(), "Second.".to_string()],
            final_summary: "First. Second".to_string(),
            chunk_summaries: vec!["one".to_string(), "two".to_string()],
            original_text: "the original text".to_string(),
        }
    }

    #[test]
    fn test_full_notes_layout() {
        let notes = format_full_notes(&report());
        let rule = "=".repeat(50);

        assert!(notes.starts_with(&format!(
            "YouTube to Notes - Complete Summary\n{}\n\n",
            rule
        )));
        assert!(notes.contains("SOURCE: YouTube\nORIGINAL LENGTH: 10 words\n"));
        assert!(notes.contains("COMPRESSION: 60.0%\n"));
        assert!(notes.contains(&format!(
            "{rule}\nKEY POINTS\n{rule}\n\n1. First.\n2. Second.\n\n"
        )));
        assert!(notes.contains("[Chunk 1]\none\n\n[Chunk 2]\ntwo\n\n"));
        assert!(notes.ends_with(&format!(
            "{rule}\nORIGINAL TEXT\n{rule}\n\nthe original text\n"
        )));
    }

    #[test]
    fn test_summary_only_layout() {
        assert_eq!(
            format_summary_only(&report()),
            "SUMMARY\n\nFirst. Second\n\nKEY POINTS:\n1. First.\n2. Second."
        );
    }

    #[test]
    fn test_format_source() {
        assert_eq!(format_source(&report().source), "Source: YouTube | Video ID: abc");
        assert_eq!(
            format_source(&SourceInfo::File {
                filename: "a.txt".to_string(),
                size: 3
            }),
            "Source: File | File: a.txt"
        );
        assert_eq!(
            format_source(&SourceInfo::Text { length: 100 }),
            "Source: Manual Text"
        );
    }
}
