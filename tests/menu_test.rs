//! Tests for the interactive menu, driven through in-memory input and output

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::{fixture, rstest};

use course_index::application::services::{CatalogOptions, CatalogService};
use course_index::cli::menu::Menu;
use course_index::domain::{Course, CourseIndex};
use course_index::infrastructure::traits::RealFileSystem;
use course_index::util::testing;

fn resource(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources")
        .join(name)
}

#[fixture]
fn catalog() -> CatalogService {
    testing::init_test_setup();
    CatalogService::new(Arc::new(RealFileSystem), CatalogOptions::default())
}

/// Run a session and return its transcript and the final course count.
fn run_session(
    catalog: &CatalogService,
    index: Option<CourseIndex>,
    default_file: Option<PathBuf>,
    input: &str,
) -> (String, usize) {
    let mut out = Vec::new();
    let len = {
        let mut menu = Menu::new(catalog, input.as_bytes(), &mut out).with_default_file(default_file);
        if let Some(index) = index {
            menu = menu.with_index(index);
        }
        menu.run().expect("menu run").len()
    };
    (String::from_utf8(out).expect("utf8 output"), len)
}

fn abcu(catalog: &CatalogService) -> Option<CourseIndex> {
    Some(catalog.load(&resource("courses.csv")).expect("load abcu"))
}

fn position(transcript: &str, needle: &str) -> usize {
    transcript
        .find(needle)
        .unwrap_or_else(|| panic!("missing {needle:?} in:\n{transcript}"))
}

#[rstest]
fn given_file_path_when_loading_then_courses_listed_in_order(catalog: CatalogService) {
    let input = format!("1\n{}\n2\n9\n", resource("courses.csv").display());

    let (out, len) = run_session(&catalog, None, None, &input);

    assert_eq!(len, 8);
    assert!(out.contains("Loaded 8 courses."));
    assert!(out.contains("Here is a sample schedule:"));
    let first = position(&out, "CSCI100 | Introduction to Computer Science");
    let middle = position(&out, "CSCI300 | Introduction to Algorithms");
    let last = position(&out, "MATH201 | Discrete Mathematics");
    assert!(first < middle && middle < last);
    assert!(out.contains("Thank you for using the course planner!"));
}

#[rstest]
fn given_default_file_when_load_prompt_left_empty_then_default_loaded(catalog: CatalogService) {
    let (out, len) = run_session(
        &catalog,
        None,
        Some(resource("courses_sorted.csv")),
        "1\n\n9\n",
    );

    assert!(out.contains("Catalog file ["));
    assert!(out.contains("Loaded 8 courses."));
    assert_eq!(len, 8);
}

#[rstest]
fn given_missing_file_when_loading_then_error_reported_and_loop_continues(
    catalog: CatalogService,
) {
    let (out, len) = run_session(&catalog, None, None, "1\n/no/such/courses.csv\n9\n");

    assert!(out.contains("error: catalog file not found: /no/such/courses.csv"));
    assert!(out.contains("Thank you for using the course planner!"));
    assert_eq!(len, 0);
}

#[rstest]
fn given_invalid_catalog_when_loading_then_each_issue_is_shown(catalog: CatalogService) {
    let input = format!("1\n{}\n9\n", resource("broken_prereq.csv").display());

    let (out, _) = run_session(&catalog, None, None, &input);

    assert!(out.contains("error: catalog failed validation with 2 issue(s)"));
    assert!(out.contains("  CS1: identifier must be exactly 7 characters"));
    assert!(out.contains("  CSCI200: prerequisite CSCI101 not found"));
}

#[rstest]
#[case("2\n")]
#[case("3\n")]
fn given_nothing_loaded_when_listing_then_notice(catalog: CatalogService, #[case] input: &str) {
    let (out, _) = run_session(&catalog, None, None, input);
    assert!(out.contains("No courses loaded."));
}

#[rstest]
fn given_catalog_when_listing_in_prerequisite_order_then_prereqs_come_first(
    catalog: CatalogService,
) {
    let (out, _) = run_session(&catalog, abcu(&catalog), None, "3\n9\n");

    assert!(out.contains("Courses in prerequisite order:"));
    assert!(position(&out, "CSCI100 |") < position(&out, "CSCI101 |"));
    assert!(position(&out, "MATH201 |") < position(&out, "CSCI300 |"));
    assert!(position(&out, "CSCI350 |") < position(&out, "CSCI400 |"));
}

#[rstest]
fn given_course_id_in_any_case_when_printing_then_shows_prerequisites(catalog: CatalogService) {
    let (out, _) = run_session(&catalog, abcu(&catalog), None, "4\ncsci300\n9\n");

    assert!(out.contains(
        "CSCI300 | Introduction to Algorithms\n\
         Prerequisites:\n  \
         CSCI200 | Data Structures\n  \
         MATH201 | Discrete Mathematics\n"
    ));
}

#[rstest]
fn given_course_without_prereqs_when_printing_then_none(catalog: CatalogService) {
    let (out, _) = run_session(&catalog, abcu(&catalog), None, "4\nMATH201\n");
    assert!(out.contains("MATH201 | Discrete Mathematics\nPrerequisites: None\n"));
}

#[rstest]
fn given_unknown_course_when_printing_then_not_found(catalog: CatalogService) {
    let (out, _) = run_session(&catalog, abcu(&catalog), None, "4\nCSCI999\n");
    assert!(out.contains("Course CSCI999 not found."));
}

#[rstest]
#[case("0")]
#[case("10")]
#[case("abc")]
fn given_invalid_choice_when_running_then_retry_notice(
    catalog: CatalogService,
    #[case] choice: &str,
) {
    let (out, _) = run_session(&catalog, None, None, &format!("{choice}\n9\n"));

    assert!(out.contains(&format!("{choice} is not a valid option.")));
    assert!(out.contains("Thank you for using the course planner!"));
}

#[rstest]
fn given_valid_course_when_inserting_then_added(catalog: CatalogService) {
    let (out, len) = run_session(
        &catalog,
        abcu(&catalog),
        None,
        "5\nCSCI450\nCompilers\nCSCI300, math201\n4\nCSCI450\n9\n",
    );

    assert!(out.contains("Course added (9 total)."));
    assert!(out.contains("  MATH201 | Discrete Mathematics"));
    assert_eq!(len, 9);
}

#[rstest]
fn given_course_with_unknown_prereq_when_inserting_then_rejected(catalog: CatalogService) {
    let (out, len) = run_session(
        &catalog,
        abcu(&catalog),
        None,
        "5\nCSCI450\nCompilers\nCSCI999\n",
    );

    assert!(out.contains("error: course CSCI450 is invalid: CSCI450: prerequisite CSCI999 not found"));
    assert_eq!(len, 8);
}

#[rstest]
fn given_dependents_when_delete_declined_then_nothing_removed(catalog: CatalogService) {
    let (out, len) = run_session(&catalog, abcu(&catalog), None, "6\nCSCI300\nn\n9\n");

    assert!(out.contains(
        "Deleting CSCI300 also removes 2 dependent course(s): CSCI350, CSCI400"
    ));
    assert!(out.contains("Delete 3 courses? (y/N)"));
    assert!(out.contains("Delete cancelled."));
    assert_eq!(len, 8);
}

#[rstest]
fn given_dependents_when_delete_confirmed_then_cascade_removed(catalog: CatalogService) {
    let (out, len) = run_session(&catalog, abcu(&catalog), None, "6\ncsci300\nyes\n7\n9\n");

    assert!(out.contains("Removed: CSCI300, CSCI350, CSCI400"));
    assert!(out.contains("Catalog is valid (5 courses)."));
    assert_eq!(len, 5);
}

#[rstest]
fn given_course_without_dependents_when_deleting_then_removed_without_prompt(
    catalog: CatalogService,
) {
    let (out, len) = run_session(&catalog, abcu(&catalog), None, "6\nCSCI400\n9\n");

    assert!(!out.contains("(y/N)"));
    assert!(out.contains("Removed: CSCI400"));
    assert_eq!(len, 7);
}

#[rstest]
fn given_unknown_course_when_deleting_then_error(catalog: CatalogService) {
    let (out, len) = run_session(&catalog, abcu(&catalog), None, "6\nCSCI999\n9\n");

    assert!(out.contains("error: course not found: CSCI999"));
    assert_eq!(len, 8);
}

#[rstest]
fn given_broken_index_when_validating_then_problems_listed(catalog: CatalogService) {
    let mut index = CourseIndex::new();
    index.insert(Course::new("CSCI100", "Introduction to Computer Science", vec![]));
    index.insert(Course::new(
        "CSCI200",
        "Data Structures",
        vec!["CSCI101".into()],
    ));

    let (out, _) = run_session(&catalog, Some(index), None, "7\n9\n");

    assert!(out.contains("Catalog has 1 problem(s):"));
    assert!(out.contains("  CSCI200: prerequisite CSCI101 not found"));
}

#[rstest]
fn given_sorted_inserts_when_rebalancing_then_height_reported(catalog: CatalogService) {
    let mut index = CourseIndex::new();
    for i in 1..=8 {
        index.insert(Course::new(format!("CSCI{}00", i), "Course Name", vec![]));
    }

    let (out, len) = run_session(&catalog, Some(index), None, "8\n9\n");

    assert!(out.contains("Rebalanced 8 courses: height 8 -> 4"));
    assert!(out.contains("CSCI500"));
    assert!(out.contains("L: CSCI300"));
    assert_eq!(len, 8);
}

#[rstest]
fn given_input_closed_when_running_then_session_ends(catalog: CatalogService) {
    let (out, len) = run_session(&catalog, None, None, "");

    assert!(out.contains("Welcome to the course planner."));
    assert!(!out.contains("Thank you"));
    assert_eq!(len, 0);
}
