//! Integration tests for naming rule rendering and sanitization

use fake::faker::lorem::en::Words;
use fake::{Fake, Faker};
use sheetbatch::core::naming::{is_valid_file_name_char, render, sanitize, NamingRule};
use sheetbatch::domain::{ProjectInfo, SheetId, SheetRef};
use test_case::test_case;

fn floor_plan() -> SheetRef {
    SheetRef::new(SheetId::new("312047").unwrap(), "A101", "Floor Plan")
}

fn project() -> ProjectInfo {
    ProjectInfo::new("P-204", "Harbour Tower").with_attribute("Client", "Port Authority")
}

#[test_case("{Sheet Number}-{Sheet Name}", "A101-Floor Plan" ; "built in sheet aliases")]
#[test_case("{Project Number}_{Sheet Number}", "P-204_A101" ; "project alias")]
#[test_case("{Client} {Sheet Number}", "Port Authority A101" ; "project attribute")]
#[test_case("{Drawn By}", "Unknown" ; "unresolved token")]
#[test_case("Issue-{Sheet Number}", "Issue-A101" ; "literal prefix")]
#[test_case("{Sheet Number}{Sheet Number}", "A101A101" ; "repeated token")]
fn test_render(rule: &str, expected: &str) {
    assert_eq!(render(rule, Some(&floor_plan()), &project()), expected);
}

#[test]
fn test_sheet_attribute_beats_builtin_alias() {
    let sheet = floor_plan().with_attribute("Sheet Number", "A-101");
    assert_eq!(render("{Sheet Number}", Some(&sheet), &project()), "A-101");
}

#[test]
fn test_sheet_alias_beats_project_attribute() {
    let project = project().with_attribute("Sheet Name", "Project Level");
    assert_eq!(
        render("{Sheet Name}", Some(&floor_plan()), &project),
        "Floor Plan"
    );
}

#[test]
fn test_project_attribute_beats_project_alias() {
    let project = project().with_attribute("Project Name", "HT Phase 2");
    assert_eq!(render("{Project Name}", None, &project), "HT Phase 2");
}

#[test]
fn test_empty_rule_renders_unnamed() {
    assert_eq!(render("", Some(&floor_plan()), &project()), "Unnamed");
}

#[test]
fn test_blank_rendering_uses_fallback() {
    let sheet = floor_plan().with_attribute("Revision", " ");
    let rule = NamingRule::new("{Revision}").with_fallback("Batch_0314");
    assert_eq!(rule.render(Some(&sheet), &project()), "Batch_0314");
}

#[test]
fn test_file_base_name_is_sanitized() {
    let sheet = SheetRef::new(SheetId::new("1").unwrap(), "A/101", "Plan: Level 1?");
    let rule = NamingRule::new("{Sheet Number} {Sheet Name}");
    assert_eq!(rule.file_base_name(Some(&sheet), &project()), "A_101 Plan_ Level 1_");
}

#[test]
fn test_sanitize_is_idempotent_for_random_strings() {
    for _ in 0..200 {
        let input: String = Faker.fake();
        let once = sanitize(&input);
        assert_eq!(sanitize(&once), once, "input: {input:?}");
    }
}

#[test]
fn test_sanitize_is_idempotent_for_hostile_names() {
    for _ in 0..100 {
        let words: Vec<String> = Words(1..6).fake();
        let input = words.join("<>:\"/\\|?*\t");
        let once = sanitize(&input);
        assert_eq!(sanitize(&once), once);
        assert!(once.chars().all(is_valid_file_name_char));
    }
}
