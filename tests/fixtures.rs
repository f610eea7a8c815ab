use pretty_assertions::assert_eq;

use faqchunk::{Chunk, ChunkingStrategy, Document, FaqProcessor};

fn summarize(chunks: &[Chunk]) -> String {
    chunks
        .iter()
        .map(|chunk| {
            format!(
                "{} | {} | {}",
                chunk.chunk_type,
                chunk.section().unwrap_or("-"),
                chunk.content().replace('\n', "\\n")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn fixtures_match_expected_output() {
    let cases = [
        (
            "tidb-faq",
            include_str!("fixtures/markdown/tidb-faq.md"),
            include_str!("fixtures/expected/tidb-faq.txt"),
        ),
        (
            "unnumbered-faq",
            include_str!("fixtures/markdown/unnumbered-faq.md"),
            include_str!("fixtures/expected/unnumbered-faq.txt"),
        ),
        (
            "plain-notes",
            include_str!("fixtures/markdown/plain-notes.md"),
            include_str!("fixtures/expected/plain-notes.txt"),
        ),
    ];

    let processor = FaqProcessor::default();
    for (name, markdown, expected) in cases {
        let document = Document::new(format!("{name}.md"), markdown);
        let chunks = processor
            .process(&document, ChunkingStrategy::QaPair)
            .expect("qa_pair never fails");
        assert_eq!(
            summarize(&chunks),
            expected.trim_end_matches('\n'),
            "fixture mismatch: {name}"
        );
    }
}

#[test]
fn header_strategy_records_faq_path() {
    let document = Document::new("tidb-faq.md", include_str!("fixtures/markdown/tidb-faq.md"));
    let chunks = FaqProcessor::default()
        .process(&document, ChunkingStrategy::MarkdownHeader)
        .expect("markdown_header never fails");

    let q3 = chunks
        .iter()
        .find(|chunk| chunk.content() == "Three TiKV nodes.")
        .expect("Q3 answer chunk");
    assert_eq!(
        q3.metadata.get("Header 1").map(String::as_str),
        Some("TiDB FAQ")
    );
    assert_eq!(
        q3.metadata.get("Header 2").map(String::as_str),
        Some("Deployment")
    );
    assert_eq!(
        q3.metadata.get("Header 4").map(String::as_str),
        Some("Q3: What is the minimum number of nodes?")
    );
    assert!(chunks.iter().all(|chunk| !chunk.content().contains("Copyright")));
}

#[test]
fn fixed_length_covers_every_word() {
    let markdown = include_str!("fixtures/markdown/plain-notes.md");
    let processor = FaqProcessor::new(faqchunk::ChunkingConfig {
        max_length: 4,
        overlap_tokens: 1,
        ..Default::default()
    });
    let chunks = processor
        .process(&Document::new("plain-notes.md", markdown), ChunkingStrategy::FixedLength)
        .expect("valid window");

    let words: Vec<&str> = markdown.split_whitespace().collect();
    let mut rebuilt: Vec<String> = Vec::new();
    for (idx, chunk) in chunks.iter().enumerate() {
        assert!(chunk.content().split(' ').count() <= 4);
        let content = chunk.content();
        let mut parts = content.split(' ');
        if idx > 0 {
            parts.next();
        }
        rebuilt.extend(parts.map(str::to_owned));
    }
    assert_eq!(rebuilt, words);
}
