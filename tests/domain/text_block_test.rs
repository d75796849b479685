use docqa::domain::{TextBlock, TextRun, group_runs_into_lines, join_blocks, sort_reading_order};

#[test]
fn given_shuffled_blocks_when_sorting_then_orders_top_to_bottom_then_left_to_right() {
    let mut blocks = vec![
        TextBlock::new(300.0, 120.0, "right column"),
        TextBlock::new(50.0, 400.0, "footer"),
        TextBlock::new(50.0, 120.0, "left column"),
        TextBlock::new(50.0, 20.0, "title"),
    ];

    sort_reading_order(&mut blocks);

    let texts: Vec<&str> = blocks.iter().map(|b| b.text.as_str()).collect();
    assert_eq!(texts, vec!["title", "left column", "right column", "footer"]);
}

#[test]
fn given_blocks_when_joining_then_each_ends_with_single_newline() {
    let blocks = vec![
        TextBlock::new(0.0, 0.0, "Heading"),
        TextBlock::new(0.0, 10.0, "Body line\n"),
    ];

    assert_eq!(join_blocks(&blocks), "Heading\nBody line\n");
}

#[test]
fn given_no_blocks_when_joining_then_returns_empty_string() {
    assert_eq!(join_blocks(&[]), "");
}

#[test]
fn given_mixed_font_runs_on_one_baseline_when_grouping_then_keeps_words_in_order() {
    let runs = vec![
        TextRun::new(120.0, 102.0, 110.0, "period"),
        TextRun::new(50.0, 95.0, 112.0, "Grace"),
        TextRun::new(170.0, 103.0, 110.0, "applies."),
    ];

    let lines = group_runs_into_lines(runs);

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "Grace period applies.");
    assert_eq!(lines[0].x, 50.0);
    assert_eq!(lines[0].y, 95.0);
}

#[test]
fn given_runs_on_separate_lines_when_grouping_then_lines_stay_apart_top_to_bottom() {
    let runs = vec![
        TextRun::new(50.0, 130.0, 140.0, "second line"),
        TextRun::new(50.0, 100.0, 110.0, "first line"),
    ];

    let lines = group_runs_into_lines(runs);

    let texts: Vec<&str> = lines.iter().map(|b| b.text.as_str()).collect();
    assert_eq!(texts, vec!["first line", "second line"]);
}

#[test]
fn given_runs_with_trailing_space_when_grouping_then_does_not_double_space() {
    let runs = vec![
        TextRun::new(10.0, 0.0, 10.0, "Room "),
        TextRun::new(40.0, 0.0, 10.0, "rent\r\n"),
    ];

    let lines = group_runs_into_lines(runs);

    assert_eq!(join_blocks(&lines), "Room rent\n");
}

#[test]
fn given_no_runs_when_grouping_then_returns_no_lines() {
    assert!(group_runs_into_lines(Vec::new()).is_empty());
}
