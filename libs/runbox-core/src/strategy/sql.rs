// Declarative-query strategy: no real execution and no artifacts. The
// response is synthesized from the leading keyword of the trimmed,
// uppercased source against a fixed table of canned results - a stand-in
// for a sandboxed database that keeps the result contract uniform.

use crate::types::ExecutionResult;

const CANNED_RESULTS: [(&str, &str); 6] = [
    (
        "SELECT",
        "id | name | email\n1 | John Doe | john@example.com\n2 | Jane Smith | jane@example.com",
    ),
    ("INSERT", "1 row(s) affected"),
    ("UPDATE", "2 row(s) affected"),
    ("DELETE", "1 row(s) affected"),
    ("CREATE", "Table created successfully"),
    ("DROP", "Table dropped successfully"),
];

const DEFAULT_RESULT: &str = "Query executed successfully";

pub fn respond(source: &str) -> &'static str {
    let upper = source.trim().to_uppercase();
    CANNED_RESULTS
        .iter()
        .find(|(keyword, _)| upper.starts_with(keyword))
        .map(|(_, result)| *result)
        .unwrap_or(DEFAULT_RESULT)
}

pub fn run(source: &str) -> ExecutionResult {
    ExecutionResult::completed(respond(source))
}
