// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - AquaHR project automation
//!
//! `cargo xtask ci` is what CI runs: clippy, docs, formatting, unused
//! dependency detection, build, tests and migration verification.
//!
//! `cargo xtask verify-migrations` checks the embedded `SQLite` schema
//! against the reference graph the persistence and API layers rely on.
//! Deleting an employee, a site or a job relies on the `ON DELETE` actions
//! checked there, and the catalog and egg migration delete guards rely on
//! the references having no action at all.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::collections::BTreeSet;
use std::{fmt::Debug, io, process::Output};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    eyre::{eyre, Context},
    Result,
};
use diesel::sql_types::Text;
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

/// One foreign key the application depends on:
/// `(table, column, referenced table, ON DELETE action)`.
type ExpectedReference = (&'static str, &'static str, &'static str, &'static str);

/// Every table the schema must contain.
const EXPECTED_TABLES: &[&str] = &[
    "applicants",
    "contracts",
    "departments",
    "employees",
    "fish_pools",
    "jobs",
    "lab_boxes",
    "parent_egg_migrations",
    "site_employees",
    "sites",
];

/// The complete reference graph of the schema.
const EXPECTED_REFERENCES: &[ExpectedReference] = &[
    ("applicants", "job_id", "jobs", "CASCADE"),
    ("contracts", "department_id", "departments", "NO ACTION"),
    ("contracts", "employee_id", "employees", "CASCADE"),
    ("employees", "department_id", "departments", "SET NULL"),
    ("jobs", "department_id", "departments", "SET NULL"),
    ("parent_egg_migrations", "employee_id", "employees", "NO ACTION"),
    ("parent_egg_migrations", "fish_pool_id", "fish_pools", "NO ACTION"),
    ("parent_egg_migrations", "lab_box_id", "lab_boxes", "NO ACTION"),
    ("site_employees", "employee_id", "employees", "CASCADE"),
    ("site_employees", "site_id", "sites", "CASCADE"),
    ("sites", "manager_id", "employees", "SET NULL"),
    ("sites", "supervisor_id", "employees", "SET NULL"),
];

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run everything CI runs
    CI,

    /// Build all targets
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check on all targets
    #[command(visible_alias = "c")]
    Check,

    /// Write an lcov coverage report to target/lcov.info
    #[command(visible_alias = "cov")]
    Coverage,

    /// Look for unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Run clippy, rustdoc and rustfmt checks
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy with warnings denied
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Build the docs with warnings denied
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check formatting
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Apply clippy suggestions
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Format the workspace
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run unit, router and doc tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests only
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run unit and router tests only
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Check the migrations apply, revert and reapply to the expected schema
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => run_cargo(&["build", "--all-targets", "--all-features"]),
            Self::Check => run_cargo(&["check", "--all-targets", "--all-features"]),
            Self::Coverage => run_cargo(&[
                "llvm-cov",
                "--lcov",
                "--output-path",
                "target/lcov.info",
                "--all-features",
            ]),
            Self::Machete => machete(),
            Self::Lint => lint(),
            Self::LintClippy => {
                run_cargo(&["clippy", "--all-targets", "--all-features", "--", "-D", "warnings"])
            }
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => run_cargo_nightly(&["fmt", "--all", "--check"]),
            Self::FixClippy => run_cargo(&[
                "clippy",
                "--all-targets",
                "--all-features",
                "--fix",
                "--allow-dirty",
                "--allow-staged",
                "--",
                "-D",
                "warnings",
            ]),
            Self::FixFormatting => run_cargo_nightly(&["fmt", "--all"]),
            Self::Test => test(),
            Self::TestDocs => run_cargo(&["test", "--doc", "--all-features"]),
            Self::TestLibs => run_cargo(&["test", "--all-targets", "--all-features"]),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    machete()?;
    Command::Build.run()?;
    test()?;
    verify_migrations()
}

fn lint() -> Result<()> {
    Command::LintClippy.run()?;
    lint_docs()?;
    Command::LintFormatting.run()
}

fn test() -> Result<()> {
    Command::TestLibs.run()?;
    // slowest, so last
    Command::TestDocs.run()
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

/// Builds each crate's docs the way docs.rs would, with warnings denied.
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd!(
            "cargo",
            "doc",
            "--no-deps",
            "--all-features",
            "--package",
            package.name.as_str()
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }
    Ok(())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

fn run_cargo_nightly(args: &[&str]) -> Result<()> {
    cmd("cargo", args)
        // set by the outer cargo invocation; would pin the stable toolchain
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Applies the migrations to a scratch database, checks the schema,
/// reverts them, confirms nothing is left, then reapplies and checks again.
fn verify_migrations() -> Result<()> {
    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create scratch SQLite database")?;
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys")?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply migrations: {e}"))?;
    tracing::info!(count = applied.len(), "Applied migrations");
    check_schema(&mut conn)?;

    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to revert migrations: {e}"))?;
    let leftover: Vec<String> = table_names(&mut conn)?;
    if !leftover.is_empty() {
        return Err(eyre!("Tables left after reverting: {leftover:?}"));
    }
    tracing::info!("Reverted migrations cleanly");

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to reapply migrations: {e}"))?;
    check_schema(&mut conn)?;

    tracing::info!("✓ Migration verification passed");
    Ok(())
}

#[derive(QueryableByName)]
struct TableName {
    #[diesel(sql_type = Text)]
    name: String,
}

#[derive(QueryableByName)]
struct ForeignKeyRow {
    #[diesel(sql_type = Text)]
    table: String,
    #[diesel(sql_type = Text)]
    from: String,
    #[diesel(sql_type = Text)]
    on_delete: String,
}

#[derive(QueryableByName)]
struct ForeignKeyViolation {
    #[diesel(sql_type = Text)]
    table: String,
    #[diesel(sql_type = Text)]
    parent: String,
}

fn table_names(conn: &mut SqliteConnection) -> Result<Vec<String>> {
    let rows: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type = 'table' \
         AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name",
    )
    .load(conn)
    .wrap_err("Failed to list tables")?;
    Ok(rows.into_iter().map(|row| row.name).collect())
}

/// Compares the live schema's tables and foreign keys with the expected
/// graph, then runs `PRAGMA foreign_key_check`.
fn check_schema(conn: &mut SqliteConnection) -> Result<()> {
    let tables: Vec<String> = table_names(conn)?;
    let mut actual: BTreeSet<(String, String, String, String)> = BTreeSet::new();
    for table in &tables {
        let rows: Vec<ForeignKeyRow> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({table})"))
                .load(conn)
                .wrap_err_with(|| format!("Failed to read foreign keys of {table}"))?;
        actual.extend(
            rows.into_iter()
                .map(|fk| (table.clone(), fk.from, fk.table, fk.on_delete)),
        );
    }

    let expected_tables: BTreeSet<String> =
        EXPECTED_TABLES.iter().map(ToString::to_string).collect();
    let actual_tables: BTreeSet<String> = tables.into_iter().collect();
    let expected: BTreeSet<(String, String, String, String)> = EXPECTED_REFERENCES
        .iter()
        .map(|(table, column, target, action)| {
            (
                (*table).to_string(),
                (*column).to_string(),
                (*target).to_string(),
                (*action).to_string(),
            )
        })
        .collect();

    let mut problems: Vec<String> = Vec::new();
    for table in expected_tables.difference(&actual_tables) {
        problems.push(format!("missing table {table}"));
    }
    for table in actual_tables.difference(&expected_tables) {
        problems.push(format!("unexpected table {table}"));
    }
    for (table, column, target, action) in expected.difference(&actual) {
        problems.push(format!(
            "missing {table}.{column} -> {target} ON DELETE {action}"
        ));
    }
    for (table, column, target, action) in actual.difference(&expected) {
        problems.push(format!(
            "unexpected {table}.{column} -> {target} ON DELETE {action}"
        ));
    }

    let orphans: Vec<ForeignKeyViolation> = diesel::sql_query("PRAGMA foreign_key_check")
        .load(conn)
        .wrap_err("Failed to run foreign_key_check")?;
    for orphan in &orphans {
        problems.push(format!(
            "{} row violates its reference to {}",
            orphan.table, orphan.parent
        ));
    }

    if problems.is_empty() {
        tracing::info!(
            tables = actual_tables.len(),
            references = actual.len(),
            "Schema matches"
        );
        return Ok(());
    }
    for problem in &problems {
        tracing::error!("{problem}");
    }
    Err(eyre!("Schema check found {} problem(s)", problems.len()))
}

trait ExpressionExt {
    /// Run the command, logging it first and again on failure
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
