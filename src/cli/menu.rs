//! Interactive menu
//!
//! Line-oriented loop over any reader/writer pair so it can be driven from tests.
//! Catalog and course errors are reported to the user and the loop continues;
//! only I/O failures on the reader/writer end it.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::CatalogService;
use crate::application::ApplicationError;
use crate::cli::output::{course_detail, course_line};
use crate::domain::{Course, CourseIndex, TreeDisplay};
use crate::infrastructure::{InfraError, InfraResult};

const MENU: &str = "\
  1. Load catalog
  2. Print course list
  3. Print course list in prerequisite order
  4. Print course
  5. Insert course
  6. Delete course
  7. Validate catalog
  8. Rebalance tree
  9. Exit";

/// Interactive catalog session.
pub struct Menu<'a, R, W> {
    catalog: &'a CatalogService,
    index: CourseIndex,
    default_file: Option<PathBuf>,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(catalog: &'a CatalogService, input: R, out: W) -> Self {
        Self {
            catalog,
            index: catalog.new_index(),
            default_file: None,
            input,
            out,
        }
    }

    /// File offered when the load prompt is left empty.
    pub fn with_default_file(mut self, file: Option<PathBuf>) -> Self {
        self.default_file = file;
        self
    }

    /// Start from an already loaded index.
    pub fn with_index(mut self, index: CourseIndex) -> Self {
        self.index = index;
        self
    }

    /// Run until the user exits or input ends; returns the catalog as the session left it.
    #[instrument(level = "debug", skip(self))]
    pub fn run(mut self) -> InfraResult<CourseIndex> {
        self.say("Welcome to the course planner.".bold())?;
        loop {
            self.say("")?;
            self.say(MENU)?;
            let Some(choice) = self.ask("What would you like to do?")? else {
                debug!("menu: input closed");
                break;
            };
            match choice.parse::<u8>() {
                Ok(1) => self.load()?,
                Ok(2) => self.print_list()?,
                Ok(3) => self.print_prerequisite_order()?,
                Ok(4) => self.print_course()?,
                Ok(5) => self.insert_course()?,
                Ok(6) => self.delete_course()?,
                Ok(7) => self.validate()?,
                Ok(8) => self.rebalance()?,
                Ok(9) => {
                    self.say("Thank you for using the course planner!")?;
                    break;
                }
                _ => self.warn(format!("{} is not a valid option.", choice))?,
            }
        }
        Ok(self.index)
    }

    fn load(&mut self) -> InfraResult<()> {
        let prompt = match &self.default_file {
            Some(file) => format!("Catalog file [{}]:", file.display()),
            None => "Catalog file:".to_string(),
        };
        let Some(answer) = self.ask(&prompt)? else {
            return Ok(());
        };
        let path = if !answer.is_empty() {
            PathBuf::from(answer)
        } else if let Some(file) = self.default_file.clone() {
            file
        } else {
            return self.warn("No file given.");
        };

        match self.catalog.load(&path) {
            Ok(index) => {
                self.index = index;
                self.say(format!("Loaded {} courses.", self.index.len()).green())
            }
            Err(e) => self.report(e),
        }
    }

    fn print_list(&mut self) -> InfraResult<()> {
        if self.index.is_empty() {
            return self.warn("No courses loaded.");
        }
        let lines: Vec<String> = self.index.iter().map(course_line).collect();
        self.say("Here is a sample schedule:".cyan().bold())?;
        lines.iter().try_for_each(|line| self.say(line))
    }

    fn print_prerequisite_order(&mut self) -> InfraResult<()> {
        if self.index.is_empty() {
            return self.warn("No courses loaded.");
        }
        let lines: Option<Vec<String>> = self
            .index
            .prerequisite_order()
            .map(|order| order.into_iter().map(course_line).collect());
        let Some(lines) = lines else {
            return self.warn("Courses cannot be ordered by prerequisites.");
        };
        self.say("Courses in prerequisite order:".cyan().bold())?;
        lines.iter().try_for_each(|line| self.say(line))
    }

    fn print_course(&mut self) -> InfraResult<()> {
        let Some(id) = self.ask("Which course do you want to know about?")? else {
            return Ok(());
        };
        let lines = self
            .index
            .find(&id)
            .map(|course| course_detail(&self.index, course));
        match lines {
            Some(lines) => lines.iter().try_for_each(|line| self.say(line)),
            None => self.warn(format!("Course {} not found.", id)),
        }
    }

    fn insert_course(&mut self) -> InfraResult<()> {
        let Some(id) = self.ask("Course id:")? else {
            return Ok(());
        };
        let Some(name) = self.ask("Course name:")? else {
            return Ok(());
        };
        let Some(prereqs) = self.ask("Prerequisites (comma separated, empty for none):")? else {
            return Ok(());
        };
        let prereqs = prereqs
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();

        match self.catalog.add_course(&mut self.index, Course::new(id, name, prereqs)) {
            Ok(()) => self.say(format!("Course added ({} total).", self.index.len()).green()),
            Err(e) => self.report(e),
        }
    }

    fn delete_course(&mut self) -> InfraResult<()> {
        let Some(id) = self.ask("Course id to delete:")? else {
            return Ok(());
        };
        let impacted = match self.catalog.deletion_impact(&self.index, &id) {
            Ok(impacted) => impacted,
            Err(e) => return self.report(e),
        };

        if impacted.len() > 1 {
            self.warn(format!(
                "Deleting {} also removes {} dependent course(s): {}",
                impacted[0],
                impacted.len() - 1,
                impacted[1..].iter().join(", ")
            ))?;
            let confirmed = self
                .ask(&format!("Delete {} courses? (y/N)", impacted.len()))?
                .is_some_and(|a| a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes"));
            if !confirmed {
                return self.say("Delete cancelled.");
            }
        }

        match self.catalog.cascade_delete(&mut self.index, &id) {
            Ok(removed) => self.say(format!("Removed: {}", removed.iter().join(", ")).green()),
            Err(e) => self.report(e),
        }
    }

    fn validate(&mut self) -> InfraResult<()> {
        if self.index.validate_courses() {
            return self.say(format!("Catalog is valid ({} courses).", self.index.len()).green());
        }
        let issues = self.index.diagnose();
        self.warn(format!("Catalog has {} problem(s):", issues.len()))?;
        issues.iter().try_for_each(|issue| self.say(format!("  {}", issue)))
    }

    fn rebalance(&mut self) -> InfraResult<()> {
        let before = self.index.height();
        self.index.rebalance();
        let after = self.index.height();
        self.say(format!(
            "Rebalanced {} courses: height {} -> {}",
            self.index.len(),
            before,
            after
        ))?;
        let shape = self.index.to_tree_string().to_string();
        self.say(shape.trim_end())
    }

    /// Prompt and read one trimmed line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> InfraResult<Option<String>> {
        write!(self.out, "{} ", prompt.cyan()).map_err(write_err)?;
        self.out.flush().map_err(write_err)?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| InfraError::console("read", e))?;
        if read == 0 {
            writeln!(self.out).map_err(write_err)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, msg: impl Display) -> InfraResult<()> {
        writeln!(self.out, "{}", msg).map_err(write_err)
    }

    fn warn(&mut self, msg: impl Display) -> InfraResult<()> {
        self.say(msg.to_string().yellow())
    }

    fn report(&mut self, e: ApplicationError) -> InfraResult<()> {
        self.say(format!("{}: {}", "error".red().bold(), e))?;
        if let ApplicationError::InvalidCatalog { issues } = &e {
            for issue in issues {
                self.say(format!("  {}", issue))?;
            }
        }
        Ok(())
    }
}

fn write_err(e: std::io::Error) -> InfraError {
    InfraError::console("write", e)
}
