//! Unit tests for requirements manifest parsing

use std::path::Path;
use venvup::error::Error;
use venvup::requirements::{Manifest, ManifestLine};

fn parse(content: &str) -> Manifest {
    Manifest::parse(Path::new("requirements.txt"), content).unwrap()
}

#[test]
fn test_backend_style_manifest() {
    // Shape of the manifest this tool is usually pointed at
    let manifest = parse(
        "fastapi==0.110.0\n\
         uvicorn[standard]==0.27.0\n\
         pydantic>=2.0\n\
         requests\n\
         beautifulsoup4\n\
         PyMuPDF\n",
    );
    assert_eq!(manifest.package_count(), 6);

    let names: Vec<_> = manifest.requirements().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "fastapi",
            "uvicorn",
            "pydantic",
            "requests",
            "beautifulsoup4",
            "PyMuPDF"
        ]
    );
}

#[test]
fn test_comments_blanks_and_trailing_comments() {
    let manifest = parse(
        "# API stack\n\
         fastapi==0.110.0\n\
         \n\
         requests  # http client\n",
    );
    assert_eq!(manifest.package_count(), 2);
}

#[test]
fn test_option_lines_are_not_packages() {
    let manifest = parse(
        "--index-url https://pypi.org/simple\n\
         -r requirements-base.txt\n\
         -e .\n\
         fastapi\n",
    );
    assert_eq!(manifest.package_count(), 1);
    assert!(matches!(manifest.lines[0], ManifestLine::Option(_)));
    assert!(matches!(manifest.lines[1], ManifestLine::Option(_)));
    assert!(matches!(manifest.lines[2], ManifestLine::Option(_)));
}

#[test]
fn test_url_requirements_passed_through() {
    let manifest = parse("git+https://github.com/example/pkg.git@v1.0\nfastapi\n");
    assert_eq!(manifest.package_count(), 1);
    assert!(matches!(manifest.lines[0], ManifestLine::Option(_)));
}

#[test]
fn test_constraint_variants() {
    let manifest = parse("a==1.0\nb>=2.0\nc~=3.1\nd!=4.0\ne<5\nf>0.1\n");
    let constraints: Vec<_> = manifest
        .requirements()
        .map(|r| r.constraint.clone().unwrap())
        .collect();
    assert_eq!(constraints, vec!["==1.0", ">=2.0", "~=3.1", "!=4.0", "<5", ">0.1"]);
}

#[test]
fn test_malformed_line_reported_with_line_number() {
    let result = Manifest::parse(
        Path::new("reqs.txt"),
        "fastapi\n\n== broken ==\n",
    );
    match result {
        Err(Error::RequirementsParseFailed { line, path, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(path, Path::new("reqs.txt"));
        }
        other => panic!("expected RequirementsParseFailed, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_structured_error() {
    let result = Manifest::load(Path::new("/definitely/not/here/requirements.txt"));
    assert!(matches!(result, Err(Error::RequirementsNotFound { .. })));
}

#[test]
fn test_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("requirements.txt");
    std::fs::write(&path, "fastapi==0.110.0\nrequests\n").unwrap();

    let manifest = Manifest::load(&path).unwrap();
    assert_eq!(manifest.package_count(), 2);
    assert_eq!(manifest.path, path);
}
