use mailmood::batch::{analyze_lines, rewrite_lines};
use mailmood::{ToneAnalyzer, ToneLabel};
use std::io::Cursor;
use std::path::Path;

const MAILBOX: &str = r#"{"text": "This is urgent. Please respond ASAP!"}

{"text": "Thanks so much, I really appreciate your help.", "mode": "outgoing"}
not json at all
{"text": "   "}
{"mode": "incoming"}
{"text": "Please review and share an update."}
"#;

#[test]
fn analyze_lines_skips_bad_lines_and_keeps_line_indexes() {
    let analyzer = ToneAnalyzer::default();
    let records =
        analyze_lines(&analyzer, Cursor::new(MAILBOX), Path::new("mailbox.jsonl")).unwrap();

    let indexes: Vec<usize> = records.iter().map(|r| r.index).collect();
    assert_eq!(indexes, vec![0, 2, 6]);

    let tones: Vec<ToneLabel> = records.iter().map(|r| r.response.tone_label).collect();
    assert_eq!(
        tones,
        vec![
            ToneLabel::UrgentTense,
            ToneLabel::WarmPositive,
            ToneLabel::CalmProfessional,
        ]
    );
}

#[test]
fn empty_input_gives_no_records() {
    let analyzer = ToneAnalyzer::default();
    let records = analyze_lines(&analyzer, Cursor::new("\n\n"), Path::new("empty.jsonl")).unwrap();
    assert!(records.is_empty());
}

#[test]
fn batch_records_serialize_with_index_and_response() {
    let analyzer = ToneAnalyzer::default();
    let input = r#"{"text": "Please review and share an update."}"#;
    let records = analyze_lines(&analyzer, Cursor::new(input), Path::new("one.jsonl")).unwrap();

    let value = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(value["index"], 0);
    assert_eq!(value["response"]["toneLabel"], "calm_professional");
}

#[test]
fn rewrite_lines_use_per_line_or_default_target() {
    let analyzer = ToneAnalyzer::default();
    let input = concat!(
        r#"{"text": "Please review the document.", "targetTone": "warm_positive"}"#,
        "\n",
        r#"{"text": "You must send it ASAP."}"#,
        "\n",
        r#"{"text": ""}"#,
        "\n",
    );
    let records = rewrite_lines(
        &analyzer,
        Cursor::new(input),
        Path::new("drafts.jsonl"),
        ToneLabel::CalmProfessional,
    )
    .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].index, 0);
    assert_eq!(
        records[0].response.rewritten,
        "Hi,\n\nPlease review the document.\n\nThanks for your help."
    );
    assert_eq!(records[1].index, 1);
    assert_eq!(records[1].response.rewritten, "You could send it as soon as possible.");
}
