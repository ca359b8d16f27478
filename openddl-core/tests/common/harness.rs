//! Test harness for running fixtures with stochastic variations

use crate::common::{Gen, TestCase};
use openddl_core::export::write_value;
use openddl_core::{
    DataBlock, DataPayload, Document, Node, ParseError, ParseErrorKind, PropertyValue, Value,
};

/// Result of running a test
#[derive(Debug)]
pub struct TestResult {
    pub passed: bool,
    pub input: Vec<u8>,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
    pub seed: u64,
    pub errors: Vec<String>,
}

// ============================================================================
// Tree dump
// ============================================================================

fn value_text(value: &Value) -> String {
    let mut s = String::new();
    write_value(value, &mut s).expect("writing to a String");
    s
}

fn list_text(values: &[Value]) -> String {
    let items: Vec<String> = values.iter().map(value_text).collect();
    format!("[{}]", items.join(", "))
}

fn block_line(block: &DataBlock) -> String {
    let mut line = block.ty.name().to_string();
    if let Some(n) = block.array_size {
        line.push_str(&format!("[{}]", n));
    }
    if let Some(name) = &block.name {
        line.push_str(&format!(" {}", name));
    }
    let payload = match &block.payload {
        DataPayload::List(values) => list_text(values),
        DataPayload::Arrays(arrays) => {
            let items: Vec<String> = arrays.iter().map(|a| list_text(a)).collect();
            format!("[{}]", items.join(", "))
        }
    };
    format!("{} {}", line, payload)
}

fn dump_body(node: Node<'_>, depth: usize, out: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    for block in node.data() {
        out.push(format!("{}{}", indent, block_line(block)));
    }
    for child in node.children() {
        let mut header = child.type_name().unwrap_or_default().to_string();
        if let Some(name) = child.name() {
            header.push_str(&format!(" {}", name));
        }
        out.push(format!("{}{}", indent, header));
        for property in child.properties() {
            let value = match &property.value {
                PropertyValue::Literal(v) => format!("{} {}", v.value_type(), value_text(v)),
                PropertyValue::Reference(r) => format!("ref {}", r),
            };
            out.push(format!("{}  @{} = {}", indent, property.key, value));
        }
        dump_body(child, depth + 1, out);
    }
}

/// One line per structure, property, and data block, indented two spaces
/// per level. Data blocks come before child structures.
pub fn dump_tree(doc: &Document) -> Vec<String> {
    let mut out = Vec::new();
    dump_body(doc.root(), 0, &mut out);
    out
}

/// Variant name of an error kind: `Unclosed`, `OutOfRange`, ...
pub fn error_name(kind: &ParseErrorKind) -> String {
    let debug = format!("{:?}", kind);
    debug
        .split(|c: char| c == '(' || c == ' ' || c == '{')
        .next()
        .unwrap_or_default()
        .to_string()
}

fn outcome(input: &[u8]) -> Result<Vec<String>, ParseError> {
    Document::parse(input).map(|doc| dump_tree(&doc))
}

fn check_error(
    case: &TestCase,
    result: &Result<Vec<String>, ParseError>,
    errors: &mut Vec<String>,
) -> Vec<String> {
    let expected = case.error.clone().unwrap_or_default();
    match result {
        Err(err) => {
            let actual = error_name(&err.kind);
            if actual != expected {
                errors.push(format!("Expected error {}, got {} ({})", expected, actual, err));
            }
            vec![format!("error {}", actual)]
        }
        Ok(tree) => {
            errors.push(format!("Expected error {}, but parse succeeded", expected));
            tree.clone()
        }
    }
}

// ============================================================================
// Runners
// ============================================================================

/// Run a single test case (canonical, no variations)
pub fn run_test(case: &TestCase) -> TestResult {
    let input = case.ddl.as_bytes();
    let result = outcome(input);
    let mut errors = Vec::new();

    let (expected, actual) = if case.error.is_some() {
        let actual = check_error(case, &result, &mut errors);
        (vec![format!("error {}", case.error.clone().unwrap_or_default())], actual)
    } else {
        let actual = match result {
            Ok(tree) => tree,
            Err(err) => {
                errors.push(format!("Unexpected error: {}", err));
                Vec::new()
            }
        };
        if actual.len() != case.tree.len() {
            errors.push(format!(
                "Line count mismatch: expected {}, got {}",
                case.tree.len(),
                actual.len()
            ));
        }
        for (i, (act, exp)) in actual.iter().zip(case.tree.iter()).enumerate() {
            if act != exp {
                errors.push(format!("Line {}: expected '{}', got '{}'", i, exp, act));
            }
        }
        (case.tree.clone(), actual)
    };

    TestResult {
        passed: errors.is_empty(),
        input: input.to_vec(),
        expected,
        actual,
        seed: 0,
        errors,
    }
}

/// Replace every whitespace run outside string literals and comments with
/// generated separators (comments, blank lines, tabs, CR line endings).
fn scramble_whitespace(ddl: &[u8], gen: &mut Gen) -> Vec<u8> {
    let mut out = Vec::with_capacity(ddl.len() * 2);
    let mut in_string = false;
    let mut i = 0;
    while i < ddl.len() {
        let b = ddl[i];
        if in_string {
            out.push(b);
            if b == b'\\' && i + 1 < ddl.len() {
                out.push(ddl[i + 1]);
                i += 1;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
        } else if ddl[i..].starts_with(b"//") {
            // Copied with the line break that ends it.
            let end = ddl[i..]
                .iter()
                .position(|&c| c == b'\n' || c == b'\r')
                .map_or(ddl.len(), |p| i + p + 1);
            out.extend(&ddl[i..end]);
            i = end;
        } else if ddl[i..].starts_with(b"/*") {
            let end = ddl[i + 2..]
                .windows(2)
                .position(|w| w == b"*/")
                .map_or(ddl.len(), |p| i + 2 + p + 2);
            out.extend(&ddl[i..end]);
            i = end;
        } else if b.is_ascii_whitespace() {
            while i < ddl.len() && ddl[i].is_ascii_whitespace() {
                i += 1;
            }
            out.extend(gen.separator());
        } else {
            in_string = b == b'"';
            out.push(b);
            i += 1;
        }
    }
    out
}

/// Run test with stochastic variations
///
/// Applies independent variations:
/// - 40% chance of an unrelated structure above
/// - Whitespace runs replaced by comments and blank lines
/// - Random separators around the document
/// - 40% chance of an unrelated structure below
pub fn run_with_variations(case: &TestCase, gen: &mut Gen) -> TestResult {
    let mut input = Vec::new();

    if gen.chance(0.4) {
        input.extend(gen.ddl_fragment());
    }
    input.extend(gen.separator());
    input.extend(scramble_whitespace(case.ddl.as_bytes(), gen));
    input.extend(gen.separator());
    if gen.chance(0.4) {
        input.extend(gen.ddl_fragment());
    }

    let result = outcome(&input);
    let mut errors = Vec::new();

    let (expected, actual) = if case.error.is_some() {
        let actual = check_error(case, &result, &mut errors);
        (vec![format!("error {}", case.error.clone().unwrap_or_default())], actual)
    } else {
        let actual = match result {
            Ok(tree) => tree,
            Err(err) => {
                errors.push(format!("Unexpected error: {}", err));
                Vec::new()
            }
        };

        // Extra lines may come from the wrapping context, so the expected
        // lines only have to appear in order.
        let mut exp_idx = 0;
        for act in &actual {
            if exp_idx < case.tree.len() && act == &case.tree[exp_idx] {
                exp_idx += 1;
            }
        }
        if exp_idx < case.tree.len() {
            errors.push(format!(
                "Missing expected lines starting at index {}: {:?}",
                exp_idx,
                &case.tree[exp_idx..]
            ));
        }
        (case.tree.clone(), actual)
    };

    TestResult {
        passed: errors.is_empty(),
        input,
        expected,
        actual,
        seed: gen.seed,
        errors,
    }
}

impl TestResult {
    /// Print detailed failure info
    pub fn print_failure(&self, case_id: &str) {
        eprintln!("\n=== FAILED: {} ===", case_id);
        eprintln!("Seed: {} (set ODDL_TEST_SEED={} to reproduce)", self.seed, self.seed);
        eprintln!("\nInput:");
        eprintln!("{}", String::from_utf8_lossy(&self.input));
        eprintln!("\nExpected:");
        for (i, e) in self.expected.iter().enumerate() {
            eprintln!("  {}: {}", i, e);
        }
        eprintln!("\nActual:");
        for (i, e) in self.actual.iter().enumerate() {
            eprintln!("  {}: {}", i, e);
        }
        eprintln!("\nErrors:");
        for e in &self.errors {
            eprintln!("  - {}", e);
        }
    }
}
