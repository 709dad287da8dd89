use pretty_assertions::assert_eq;
use refmt_core::{
    CUSTOM_STYLE, FormatError, FormatOptions, FormatOutcome, FormatSession, HostBuffer,
    OffsetIndex, Position, Selection, SessionState,
};
use refmt_core_simple::WhitespaceFormatter;
use refmt_core_style::{PredefinedStyle, StyleRegistry};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn format(host: &HostBuffer, options: FormatOptions) -> Result<FormatOutcome, FormatError> {
    init_tracing();
    let registry = StyleRegistry::new();
    let formatter = WhitespaceFormatter::new();
    FormatSession::new(&registry, &formatter, options).run(host)
}

#[test]
fn test_cursor_follows_reformatted_line() {
    // Line 1 is "int y  =2;\n": 'y' at column 4, '=' at column 7.
    let host = HostBuffer::new(
        "int x=1;\nint y  =2;\n",
        vec![Selection::cursor(1, 4), Selection::cursor(1, 7)],
    );

    let outcome = format(&host, FormatOptions::new("LLVM")).unwrap();
    let formatted = outcome.formatted().expect("buffer should change");

    assert_eq!(formatted.text, "int x = 1;\nint y = 2;\n");
    assert_eq!(
        formatted.selections,
        vec![Selection::cursor(1, 4), Selection::cursor(1, 6)]
    );
    assert!(!formatted.fallback_cursor);
}

#[test]
fn test_selection_spanning_edits() {
    let host = HostBuffer::new(
        "int x=1;\nint y  =2;\n",
        vec![Selection::new(Position::new(0, 6), Position::new(1, 8))],
    );

    let outcome = format(&host, FormatOptions::new("LLVM")).unwrap();
    let formatted = outcome.formatted().unwrap();

    // From the '1' on line 0 to the '2' on line 1.
    assert_eq!(
        formatted.selections,
        vec![Selection::new(Position::new(0, 8), Position::new(1, 8))]
    );
}

#[test]
fn test_second_pass_needs_no_change() {
    let source = "#include <b.h>\n#include <a.h>   \n\n\n\nint main() {\n\tint x=1;\n  x  +=2;\n}";
    let host = HostBuffer::new(source, vec![Selection::cursor(6, 3)]);

    let first = format(&host, FormatOptions::new("Google")).unwrap();
    let mut host = host;
    host.apply(first);
    assert_eq!(
        host.text,
        "#include <a.h>\n#include <b.h>\n\nint main() {\n  int x = 1;\n  x += 2;\n}\n"
    );

    let second = format(&host, FormatOptions::new("Google")).unwrap();
    assert_eq!(second, FormatOutcome::NoChangeNeeded);
}

#[test]
fn test_already_formatted_buffer_is_untouched() {
    let host = HostBuffer::new("int x = 1;\n", vec![Selection::cursor(0, 3)]);
    let outcome = format(&host, FormatOptions::new("llvm")).unwrap();

    assert_eq!(outcome, FormatOutcome::NoChangeNeeded);
    let mut installed = host.clone();
    installed.apply(outcome);
    assert_eq!(installed, host);
}

#[test]
fn test_custom_style_without_configuration() {
    let host = HostBuffer::new("int x=1;\n", vec![Selection::cursor(0, 0)]);

    let err = format(&host, FormatOptions::new(CUSTOM_STYLE)).unwrap_err();
    assert!(matches!(err, FormatError::StyleUnavailable { .. }));
    assert!(err.to_string().contains("custom"));
    assert_eq!(err.style(), Some("custom"));
}

#[test]
fn test_custom_style_document() {
    let host = HostBuffer::new("#include <b>\n#include <a>\nx=1;", vec![]);
    let yaml = "BasedOnStyle: WebKit\nSpaceBeforeAssignmentOperators: false\n";

    let outcome = format(
        &host,
        FormatOptions::new(CUSTOM_STYLE).with_custom_style(yaml),
    )
    .unwrap();

    // WebKit: no include sorting, no final newline; assignments untouched.
    assert_eq!(outcome, FormatOutcome::NoChangeNeeded);
}

#[test]
fn test_unknown_predefined_style() {
    let host = HostBuffer::new("x=1;\n", vec![]);
    let err = format(&host, FormatOptions::new("GNU")).unwrap_err();
    assert_eq!(err.style(), Some("GNU"));
}

#[test]
fn test_fallback_cursor_without_selections() {
    let host = HostBuffer::new("int x=1;\n", Vec::new());
    let outcome = format(&host, FormatOptions::new("LLVM")).unwrap();
    let formatted = outcome.formatted().unwrap();

    assert_eq!(formatted.selections, vec![Selection::cursor(0, 0)]);
    assert!(formatted.fallback_cursor);
}

#[test]
fn test_fallback_cursor_when_all_selections_invalid() {
    let host = HostBuffer::new(
        "int x=1;\n",
        vec![Selection::cursor(4, 0), Selection::cursor(0, 40)],
    );
    let outcome = format(&host, FormatOptions::new("LLVM")).unwrap();
    let formatted = outcome.formatted().unwrap();

    assert_eq!(formatted.selections, vec![Selection::cursor(0, 0)]);
    assert!(formatted.fallback_cursor);
}

#[test]
fn test_cursor_at_eof_after_newline_insertion() {
    let host = HostBuffer::new("a;\nb=2;", vec![Selection::cursor(1, 4)]);
    let outcome = format(&host, FormatOptions::new("LLVM")).unwrap();
    let formatted = outcome.formatted().unwrap();

    assert_eq!(formatted.text, "a;\nb = 2;\n");
    // The insertion at EOF pushes the EOF cursor past the new newline.
    assert_eq!(formatted.selections, vec![Selection::cursor(1, 7)]);
}

#[test]
fn test_cursor_on_line_after_trailing_newline() {
    // Hosts put the EOF cursor of a newline-terminated buffer at (line_count, 0).
    let host = HostBuffer::new("int x=1;\nint y=2;\n", vec![Selection::cursor(2, 0)]);
    let outcome = format(&host, FormatOptions::new("LLVM")).unwrap();
    let formatted = outcome.formatted().unwrap();

    assert_eq!(formatted.text, "int x = 1;\nint y = 2;\n");
    assert!(!formatted.fallback_cursor);
    assert_eq!(formatted.selections, vec![Selection::cursor(1, 11)]);

    let index = OffsetIndex::from_text(&formatted.text);
    assert_eq!(
        index.checked_offset_of_position(formatted.selections[0].start),
        Some(formatted.text.chars().count())
    );
}

#[test]
fn test_include_sorting_honours_filename_hint() {
    let host = HostBuffer::new(
        "#include <vector>\n#include \"widget.h\"\n",
        vec![Selection::cursor(1, 0)],
    );
    let options = FormatOptions::new("Chromium").with_filename_hint("widget.cc");

    let outcome = format(&host, options).unwrap();
    assert_eq!(
        outcome.formatted().map(|f| f.text.as_str()),
        Some("#include \"widget.h\"\n#include <vector>\n")
    );
}

#[test]
fn test_session_reports_failed_state() {
    let registry = StyleRegistry::with_default(PredefinedStyle::Mozilla);
    let formatter = WhitespaceFormatter::new();
    let mut session = FormatSession::new(&registry, &formatter, FormatOptions::new("nope"));

    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.run(&HostBuffer::new("x", vec![])).is_err());
    assert_eq!(session.state(), SessionState::Failed);
}
