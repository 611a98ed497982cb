//! End-to-end rewrite tests on in-memory Go sources

use pretty_assertions::assert_eq;
use regshift::{rewrite_source, Error, MissingPayload, RewriteConfig};
use rstest::rstest;

const HEADER: &str = "package rfc\n\nimport (\n\t\"github.com/zmap/zlint/v3/lint\"\n\t\"github.com/zmap/zlint/v3/util\"\n)\n\n";

fn file(body: &str) -> String {
    format!("{}{}", HEADER, body)
}

fn rewrite(src: &str) -> String {
    rewrite_source(src, &RewriteConfig::default()).unwrap().text
}

#[test]
fn test_typical_lint_file() {
    let input = file(
        r#"type basicConstCrit struct{}

func init() {
	lint.RegisterLint(&lint.Lint{
		Name:          "e_basic_constraints_not_critical",
		Description:   "basicConstraints MUST appear as a critical extension",
		Citation:      "RFC 5280: 4.2.1.9",
		Source:        lint.RFC5280,
		EffectiveDate: util.RFC2459Date,
		Lint:          NewBasicConstCrit,
	})
}

func NewBasicConstCrit() lint.LintInterface {
	return &basicConstCrit{}
}
"#,
    );
    let expected = file(
        r#"type basicConstCrit struct{}

func init() {
	lint.RegisterCertificateLint(&lint.CertificateLint{
		LintMetadata: lint.LintMetadata{
			Name:          "e_basic_constraints_not_critical",
			Description:   "basicConstraints MUST appear as a critical extension",
			Citation:      "RFC 5280: 4.2.1.9",
			Source:        lint.RFC5280,
			EffectiveDate: util.RFC2459Date,
		},
		Lint: NewBasicConstCrit,
	})
}

func NewBasicConstCrit() lint.LintInterface {
	return &basicConstCrit{}
}
"#,
    );

    let out = rewrite_source(&input, &RewriteConfig::default()).unwrap();
    assert_eq!(out.rewrites, 1);
    assert_eq!(out.text, expected);
}

#[test]
fn test_single_line_call_is_expanded() {
    let input = file("func init() {\n\tlint.RegisterLint(&lint.Lint{Name: \"x\", Lint: myLintImpl})\n}\n");
    let expected = file(
        "func init() {\n\
         \tlint.RegisterCertificateLint(&lint.CertificateLint{\n\
         \t\tLintMetadata: lint.LintMetadata{\n\
         \t\t\tName: \"x\",\n\
         \t\t},\n\
         \t\tLint: myLintImpl,\n\
         \t})\n\
         }\n",
    );
    assert_eq!(rewrite(&input), expected);
}

#[test]
fn test_comments_and_blank_lines_follow_fields() {
    let input = file(
        r#"func init() {
	lint.RegisterLint(&lint.Lint{
		// The lint's name
		Name: "w_x", // warn
		Lint: &x{},

		Source: lint.CABFBaselineRequirements,
	})
}
"#,
    );
    let expected = file(
        r#"func init() {
	lint.RegisterCertificateLint(&lint.CertificateLint{
		LintMetadata: lint.LintMetadata{
			// The lint's name
			Name: "w_x", // warn

			Source: lint.CABFBaselineRequirements,
		},
		Lint: &x{},
	})
}
"#,
    );
    assert_eq!(rewrite(&input), expected);
}

#[test]
fn test_multiline_value_is_reindented() {
    let input = file(
        "func init() {\n\tlint.RegisterLint(&lint.Lint{\n\t\tName: \"x\",\n\t\tDescription: \"first \" +\n\t\t\t\"second\",\n\t\tLint: New,\n\t})\n}\n",
    );
    let out = rewrite(&input);
    assert!(
        out.contains("\t\t\tDescription: \"first \" +\n\t\t\t\t\"second\",\n"),
        "{out}"
    );
}

#[test]
fn test_raw_string_value_keeps_content() {
    let input = file(
        "func init() {\n\tlint.RegisterLint(&lint.Lint{\n\t\tName: \"x\",\n\t\tDescription: `line one\n\t\tline two`,\n\t\tLint: New,\n\t})\n}\n",
    );
    let out = rewrite(&input);
    assert!(out.contains("Description: `line one\n\t\tline two`,"), "{out}");
}

#[test]
fn test_last_payload_wins() {
    let input = file(
        "func init() {\n\tlint.RegisterLint(&lint.Lint{Lint: v1, Name: \"x\", Lint: v2})\n}\n",
    );
    let out = rewrite(&input);
    assert!(out.contains("\t\tLint: v2,\n"), "{out}");
    assert!(!out.contains("v1"), "{out}");
}

#[rstest]
#[case::one_field("{Name: \"x\", Lint: l}", 1)]
#[case::payload_first("{Lint: l, Name: \"x\", Citation: \"c\"}", 2)]
#[case::many("{A: 1, B: 2, C: 3, Lint: l, D: 4}", 4)]
fn test_metadata_field_count_and_order(#[case] literal: &str, #[case] expected: usize) {
    let input = file(&format!(
        "func init() {{\n\tlint.RegisterLint(&lint.Lint{})\n}}\n",
        literal
    ));
    let out = rewrite(&input);

    let start = out.find("lint.LintMetadata{").unwrap();
    let end = start + out[start..].find("\t\t},").unwrap();
    let keys: Vec<&str> = out[start..end]
        .lines()
        .skip(1)
        .map(|l| l.trim().split(':').next().unwrap())
        .collect();
    assert_eq!(keys.len(), expected);

    let mut sorted_by_input = keys.clone();
    sorted_by_input.sort_by_key(|k| literal.find(&format!("{}:", k)).unwrap());
    assert_eq!(keys, sorted_by_input);
}

#[test]
fn test_missing_payload_fails_by_default() {
    let input = file("func init() {\n\tlint.RegisterLint(&lint.Lint{Name: \"x\"})\n}\n");
    let err = rewrite_source(&input, &RewriteConfig::default()).unwrap_err();
    assert!(matches!(err, Error::MissingPayload { .. }), "{err}");
}

#[test]
fn test_missing_payload_emits_nil_when_allowed() {
    let input = file("func init() {\n\tlint.RegisterLint(&lint.Lint{Name: \"x\", Citation: \"c\"})\n}\n");
    let config = RewriteConfig {
        missing_payload: MissingPayload::EmitNil,
        ..Default::default()
    };
    let out = rewrite_source(&input, &config).unwrap().text;
    assert!(out.contains("\t\t\tName:     \"x\",\n\t\t\tCitation: \"c\",\n"), "{out}");
    assert!(out.contains("\t\tLint: nil,\n"), "{out}");
}

#[test]
fn test_unrelated_call_with_same_shape_untouched() {
    let input = file(
        "func init() {\n\tlint.RegisterProfile(&lint.Lint{Name: \"x\", Lint: l})\n\tRegisterLint(&lint.Lint{Name: \"y\", Lint: l})\n}\n",
    );
    let out = rewrite_source(&input, &RewriteConfig::default()).unwrap();
    assert_eq!(out.rewrites, 0);
    assert_eq!(out.text, input);
}

#[test]
fn test_same_name_other_signature_untouched() {
    let input = file("func init() {\n\tregistry.RegisterLint(name, impl)\n\tlint.RegisterLint(existing)\n}\n");
    let out = rewrite_source(&input, &RewriteConfig::default()).unwrap();
    assert_eq!(out.rewrites, 0);
    assert_eq!(out.text, input);
}

#[test]
fn test_two_candidates_rewritten_independently() {
    let input = file(
        "// first\nfunc init() {\n\tlint.RegisterLint(&lint.Lint{Name: \"a\", Lint: A})\n}\n\n// second\nfunc init() {\n\tlint.RegisterLint(&lint.Lint{Lint: B, Name: \"b\"})\n}\n",
    );
    let expected = file(
        "// first\nfunc init() {\n\
         \tlint.RegisterCertificateLint(&lint.CertificateLint{\n\
         \t\tLintMetadata: lint.LintMetadata{\n\
         \t\t\tName: \"a\",\n\
         \t\t},\n\
         \t\tLint: A,\n\
         \t})\n\
         }\n\n// second\nfunc init() {\n\
         \tlint.RegisterCertificateLint(&lint.CertificateLint{\n\
         \t\tLintMetadata: lint.LintMetadata{\n\
         \t\t\tName: \"b\",\n\
         \t\t},\n\
         \t\tLint: B,\n\
         \t})\n\
         }\n",
    );
    let out = rewrite_source(&input, &RewriteConfig::default()).unwrap();
    assert_eq!(out.rewrites, 2);
    assert_eq!(out.text, expected);
}

#[rstest]
#[case::positional("{Name: \"x\", NewFoo}")]
#[case::qualified_key("{Name: \"x\", lint.Key: 1, Lint: l}")]
#[case::literal_key("{1: \"x\", Lint: l}")]
fn test_malformed_field_aborts(#[case] literal: &str) {
    let input = file(&format!(
        "func init() {{\n\tlint.RegisterLint(&lint.Lint{})\n}}\n",
        literal
    ));
    let err = rewrite_source(&input, &RewriteConfig::default()).unwrap_err();
    match err {
        Error::FieldShape { span, .. } => assert_eq!(span.start_line, 9),
        other => panic!("Expected FieldShape, got {other:?}"),
    }
}

#[test]
fn test_second_run_is_noop() {
    let input = file(
        "func init() {\n\tlint.RegisterLint(&lint.Lint{\n\t\tName: \"x\",\n\t\tLint: New,\n\t})\n}\n",
    );
    let once = rewrite(&input);
    let twice = rewrite_source(&once, &RewriteConfig::default()).unwrap();
    assert_eq!(twice.rewrites, 0);
    assert_eq!(twice.text, once);
}

#[test]
fn test_parse_failure() {
    let err = rewrite_source("package p\n\nfunc init( {\n", &RewriteConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }), "{err}");
}

#[test]
fn test_comment_in_argument_list_is_kept() {
    let input = file(
        "func init() {\n\tlint.RegisterLint( // register the lint\n\t\t&lint.Lint{Name: \"x\", Lint: l},\n\t)\n}\n",
    );
    let expected = file(
        "func init() {\n\
         \tlint.RegisterCertificateLint(&lint.CertificateLint{\n\
         \t\t// register the lint\n\
         \t\tLintMetadata: lint.LintMetadata{\n\
         \t\t\tName: \"x\",\n\
         \t\t},\n\
         \t\tLint: l,\n\
         \t})\n\
         }\n",
    );
    assert_eq!(rewrite(&input), expected);
}

#[test]
fn test_comment_between_type_and_brace_is_kept() {
    let input = file(
        "func init() {\n\tlint.RegisterLint(&lint.Lint /* metadata */ {Name: \"x\", Lint: l})\n}\n",
    );
    let out = rewrite(&input);
    assert!(
        out.contains("\t\t/* metadata */\n\t\tLintMetadata: lint.LintMetadata{\n"),
        "{out}"
    );
}

#[test]
fn test_crlf_line_endings_preserved() {
    let input = "package p\r\n\r\nfunc init() {\r\n\tlint.RegisterLint(&lint.Lint{Name: \"x\", Lint: l})\r\n}\r\n";
    let expected = "package p\r\n\r\nfunc init() {\r\n\
                    \tlint.RegisterCertificateLint(&lint.CertificateLint{\r\n\
                    \t\tLintMetadata: lint.LintMetadata{\r\n\
                    \t\t\tName: \"x\",\r\n\
                    \t\t},\r\n\
                    \t\tLint: l,\r\n\
                    \t})\r\n\
                    }\r\n";
    let out = rewrite(input);
    assert_eq!(out, expected);
    assert!(!out.replace("\r\n", "").contains('\n'));
}
