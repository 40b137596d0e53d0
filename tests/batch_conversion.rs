mod common;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use file_to_pdf::config::ports::SilentProgress;
use file_to_pdf::facade::conversion_facade::ConversionFacade;
use file_to_pdf::facade::traits::i_conversion::ConversionFacadeTrait;
use file_to_pdf::models::conversion::{BatchOutcome, ConversionInput, ConversionOutput, OutputLayout};

use common::{is_pdf, relative_files, write_docx, write_png, write_pptx, write_text, write_xlsx};

fn run(root: &Path, output_dir: Option<PathBuf>, layout: OutputLayout, combine: bool) -> ConversionOutput {
    ConversionFacade::default()
        .execute_conversion(
            ConversionInput {
                source_dir: root.to_path_buf(),
                output_dir,
                layout,
                combine,
            },
            &SilentProgress,
        )
        .unwrap()
}

fn names(paths: &[&str]) -> BTreeSet<PathBuf> {
    paths.iter().map(PathBuf::from).collect()
}

#[test]
fn mirror_mode_recreates_directory_structure() {
    let dir = tempfile::tempdir().unwrap();
    write_text(&dir.path().join("a/b/c.txt"), "deep file");
    write_text(&dir.path().join("top.md"), "# Top");

    let output = run(dir.path(), None, OutputLayout::Mirror, false);

    assert_eq!(output.outcome(), BatchOutcome::Completed);
    assert_eq!((output.succeeded, output.failed), (2, 0));
    assert!(is_pdf(&output.output_dir.join("a/b/c.pdf")));
    assert!(is_pdf(&output.output_dir.join("top.pdf")));
    assert_eq!(output.output_dir, fs::canonicalize(dir.path()).unwrap().join("pdf"));
}

#[test]
fn flat_mode_prefixes_parents_and_avoids_collisions() {
    let dir = tempfile::tempdir().unwrap();
    write_text(&dir.path().join("x/report.txt"), "x");
    write_text(&dir.path().join("y/report.txt"), "y");
    write_text(&dir.path().join("report.txt"), "top");

    let out = tempfile::tempdir().unwrap();
    fs::write(out.path().join("report.pdf"), b"existing").unwrap();

    let output = run(dir.path(), Some(out.path().to_path_buf()), OutputLayout::Flat, false);

    assert_eq!(output.succeeded, 3);
    assert_eq!(
        relative_files(&output.output_dir),
        names(&["report.pdf", "report_1.pdf", "x_report.pdf", "y_report.pdf"])
    );
    assert_eq!(fs::read(output.output_dir.join("report.pdf")).unwrap(), b"existing");
}

#[test]
fn combine_without_files_produces_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_text(&dir.path().join("readme.rst"), "not supported");

    let output = run(dir.path(), None, OutputLayout::Mirror, true);

    assert_eq!(output.outcome(), BatchOutcome::NoFiles);
    assert!(!output.is_success());
    assert!(output.combined_path.is_none());
    assert!(relative_files(&output.output_dir).is_empty());
}

#[test]
fn combine_writes_single_named_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("reports");
    write_text(&root.join("a.txt"), "alpha\n\nbeta");
    write_png(&root.join("img/photo.png"), 64, 48);
    write_xlsx(&root.join("sheet.xlsx"), &[("Data", vec![vec!["k".to_string(), "v".to_string()]])]);

    let output = run(&root, None, OutputLayout::Flat, true);

    assert_eq!(output.outcome(), BatchOutcome::Combined);
    let combined = output.combined_path.clone().unwrap();
    assert_eq!(combined.file_name().unwrap(), "reports_combined.pdf");
    assert!(is_pdf(&combined));
    assert_eq!(relative_files(&output.output_dir), names(&["reports_combined.pdf"]));
}

#[test]
fn mirror_runs_are_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    write_text(&dir.path().join("one.txt"), "1");
    write_text(&dir.path().join("sub/two.md"), "2");
    write_png(&dir.path().join("sub/three.png"), 10, 10);

    let first = run(dir.path(), None, OutputLayout::Mirror, false);
    let first_names = relative_files(&first.output_dir);
    fs::remove_dir_all(&first.output_dir).unwrap();

    let second = run(dir.path(), None, OutputLayout::Mirror, false);
    assert_eq!(first_names, relative_files(&second.output_dir));
    assert_eq!(first_names, names(&["one.pdf", "sub/two.pdf", "sub/three.pdf"]));
}

#[test]
fn mixed_directory_converts_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_text(&dir.path().join("notes.md"), "# Notes\n\n* first\n* second\n");
    write_png(&dir.path().join("photo.png"), 120, 80);
    let rows: Vec<Vec<String>> = (0..60)
        .map(|r| vec![format!("row {}", r), format!("{}", r * 2)])
        .collect();
    write_xlsx(
        &dir.path().join("sheet.xlsx"),
        &[("Big", rows), ("Small", vec![vec!["only".to_string()]])],
    );
    write_text(&dir.path().join("ignored.zip"), "not convertible");

    let output = run(dir.path(), None, OutputLayout::Mirror, false);

    assert_eq!(output.total_files, 3);
    assert_eq!((output.succeeded, output.failed), (3, 0));
    assert_eq!(
        relative_files(&output.output_dir),
        names(&["notes.pdf", "photo.pdf", "sheet.pdf"])
    );
    for name in ["notes.pdf", "photo.pdf", "sheet.pdf"] {
        assert!(is_pdf(&output.output_dir.join(name)), "{} is not a PDF", name);
    }
}

#[test]
fn office_documents_and_pdfs_convert() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(&dir.path().join("letter.docx"), &["Dear reader,", "", "Regards"]);
    write_docx(&dir.path().join("blank.docx"), &[]);
    write_pptx(&dir.path().join("deck.pptx"), &[&["Intro", "Agenda"], &["Thanks"]]);
    fs::write(dir.path().join("existing.pdf"), b"%PDF-1.4 copied as is").unwrap();

    let output = run(dir.path(), None, OutputLayout::Mirror, false);

    assert_eq!((output.succeeded, output.failed), (4, 0));
    for name in ["letter.pdf", "blank.pdf", "deck.pdf"] {
        assert!(is_pdf(&output.output_dir.join(name)), "{} is not a PDF", name);
    }
    assert_eq!(
        fs::read(output.output_dir.join("existing.pdf")).unwrap(),
        b"%PDF-1.4 copied as is"
    );
}

#[test]
fn broken_files_fail_individually() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("corrupt.xlsx"), b"not a zip").unwrap();
    fs::write(dir.path().join("corrupt.pptx"), b"not a zip").unwrap();
    fs::write(dir.path().join("binary.txt"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

    let output = run(dir.path(), None, OutputLayout::Mirror, false);

    assert_eq!(output.outcome(), BatchOutcome::AllFailed);
    assert_eq!((output.total_files, output.failed), (3, 3));
}

#[test]
fn missing_source_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ConversionFacade::default().execute_conversion(
        ConversionInput {
            source_dir: dir.path().join("absent"),
            output_dir: None,
            layout: OutputLayout::Mirror,
            combine: false,
        },
        &SilentProgress,
    );
    assert!(result.is_err());
}
