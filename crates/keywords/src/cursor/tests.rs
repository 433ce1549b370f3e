use std::io;

use pretty_assertions::assert_eq;

use super::*;

fn first_line(text: &str) -> LineParser<io::Cursor<String>> {
	let mut parser = LineParser::from_text(text);
	assert!(parser.next_line().unwrap());
	parser
}

#[test]
fn splits_on_whitespace() {
	let parser = first_line("Iterations   10\t20\n");
	assert_eq!(parser.arguments(0), ["Iterations", "10", "20"]);
	assert_eq!(parser.argument_count(), 3);
	assert_eq!(parser.argument(3), None);
}

#[test]
fn quotes_group_words() {
	let parser = first_line(r#"Title "liquid water" 'it''s' """#);
	assert_eq!(parser.arguments(1), ["liquid water", "it", "s", ""]);
}

#[test]
fn comments_end_the_line() {
	let parser = first_line("Temperature 300.0 # kelvin\n");
	assert_eq!(parser.arguments(0), ["Temperature", "300.0"]);

	let parser = first_line("Name \"a # b\"\n");
	assert_eq!(parser.arguments(1), ["a # b"]);
}

#[test]
fn blank_and_comment_lines_are_skipped() {
	let mut parser = LineParser::from_text("\n   \n# header\nFirst 1\n\nSecond 2\n");
	assert!(parser.next_line().unwrap());
	assert_eq!(parser.argument(0), Some("First"));
	assert_eq!(parser.line_number(), 4);
	assert!(parser.next_line().unwrap());
	assert_eq!(parser.argument(0), Some("Second"));
	assert_eq!(parser.line_number(), 6);
	assert!(!parser.next_line().unwrap());
	assert_eq!(parser.argument_count(), 0);
}

#[test]
fn unterminated_quote_is_an_error() {
	let mut parser = LineParser::from_text("Name \"open\n");
	let err = parser.next_line().unwrap_err();
	assert!(matches!(err, crate::error::CursorError::UnterminatedQuote { line: 1 }));
}

#[test]
fn set_line_replaces_arguments() {
	let mut parser = LineParser::from_text("");
	parser.set_line("A b c").unwrap();
	assert_eq!(parser.arguments(1), ["b", "c"]);
}

#[test]
fn quote_argument_only_when_needed() {
	assert_eq!(quote_argument("plain"), "plain");
	assert_eq!(quote_argument("two words"), "\"two words\"");
	assert_eq!(quote_argument(""), "\"\"");
	assert_eq!(quote_argument("say \"hi\""), "'say \"hi\"'");
	assert_eq!(quote_argument("a#b"), "\"a#b\"");
}

#[test]
fn quoted_output_parses_back() {
	for token in ["plain", "two words", "", "say \"hi\"", "a#b"] {
		let mut parser = LineParser::from_text("");
		parser.set_line(&format!("Key {}", quote_argument(token))).unwrap();
		assert_eq!(parser.argument(1), Some(token));
	}
}

#[test]
fn writer_prefixes_lines() {
	let mut writer = LineWriter::new(Vec::new());
	write_arguments(&mut writer, "  ", "Vector", ["1", "2", "3"]).unwrap();
	writer.write_line("", "End").unwrap();
	assert_eq!(writer.into_string(), "  Vector 1 2 3\nEnd\n");
}
