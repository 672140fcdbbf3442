//! Integration tests for the batch driver.
//!
//! These tests run the real driver over temporary directories with a canned
//! [`Completion`] implementation standing in for the remote service — no
//! network, no API key. PDF fixtures are built in memory with `lopdf`.

use batchdoc::{run_batch, BatchConfig, Completion, FileError, PipelineKind};
use lopdf::{dictionary, Document, Object, Stream};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

// ── Test doubles ─────────────────────────────────────────────────────────────

/// Returns the same completion for every prompt and records what it was
/// asked, so tests can assert on the exact text the driver submitted.
struct FixedCompletion {
    response: String,
    prompts: Mutex<Vec<String>>,
}

impl FixedCompletion {
    fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn seen_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Completion for FixedCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, FileError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.response.clone())
    }
}

/// Fails whenever the prompt contains `poison`, succeeds otherwise.
struct PoisonedCompletion {
    poison: String,
}

impl Completion for PoisonedCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, FileError> {
        if prompt.contains(&self.poison) {
            Err(FileError::Completion {
                detail: "simulated transport error".into(),
            })
        } else {
            Ok("generated".to_string())
        }
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

fn config(input: &Path, output: &Path) -> BatchConfig {
    BatchConfig::builder()
        .input_dir(input)
        .output_dir(output)
        .build()
        .unwrap()
}

/// Build a PDF where each page draws one text string.
fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in texts {
        let content = format!("BT /F1 12 Tf 50 700 Td ({text}) Tj ET");
        let content_id = doc.add_object(Object::Stream(Stream::new(
            dictionary! {},
            content.into_bytes(),
        )));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

// ── Code pipeline ────────────────────────────────────────────────────────────

#[tokio::test]
async fn code_pipeline_writes_md_and_ignores_other_extensions() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("foo.cpp"), "int main() { return 0; }").unwrap();
    fs::write(input.path().join("bar.txt"), "not source code").unwrap();

    let client = FixedCompletion::new("# foo\n\nEntry point.");
    let summary = run_batch(
        PipelineKind::ApiDocs,
        &config(input.path(), output.path()),
        &client,
    )
    .await
    .unwrap();

    assert_eq!(summary.matched, 1);
    assert_eq!(summary.written, 1);
    assert_eq!(summary.skipped, 0);

    let entries: Vec<_> = fs::read_dir(output.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(entries, vec!["foo.md"]);
    assert_eq!(
        fs::read_to_string(output.path().join("foo.md")).unwrap(),
        "# foo\n\nEntry point."
    );
}

#[tokio::test]
async fn code_pipeline_picks_up_headers() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("widget.h"), "class Widget;").unwrap();

    let client = FixedCompletion::new("# Widget");
    let summary = run_batch(
        PipelineKind::ApiDocs,
        &config(input.path(), output.path()),
        &client,
    )
    .await
    .unwrap();

    assert_eq!(summary.written, 1);
    assert!(output.path().join("widget.md").is_file());
}

#[tokio::test]
async fn source_content_is_embedded_in_the_prompt() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("adder.cpp"), "int add(int a, int b);").unwrap();

    let client = FixedCompletion::new("docs");
    run_batch(
        PipelineKind::ApiDocs,
        &config(input.path(), output.path()),
        &client,
    )
    .await
    .unwrap();

    let prompts = client.seen_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("int add(int a, int b);"));
    assert!(prompts[0].contains("Markdown"));
}

#[tokio::test]
async fn unreadable_source_is_skipped_and_batch_continues() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    // Invalid UTF-8 makes read_to_string fail for this file only.
    fs::write(input.path().join("bad.cpp"), [0xff, 0xfe, 0x00, 0x41]).unwrap();
    fs::write(input.path().join("good.cpp"), "void ok();").unwrap();

    let client = FixedCompletion::new("docs");
    let summary = run_batch(
        PipelineKind::ApiDocs,
        &config(input.path(), output.path()),
        &client,
    )
    .await
    .unwrap();

    assert_eq!(summary.matched, 2);
    assert_eq!(summary.written, 1);
    assert_eq!(summary.skipped, 1);
    assert!(!output.path().join("bad.md").exists());
    assert!(output.path().join("good.md").is_file());
}

// ── Datasheet pipeline ───────────────────────────────────────────────────────

#[tokio::test]
async fn pdf_page_texts_reach_the_model_joined_by_newline() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("doc1.pdf"), pdf_with_pages(&["A", "B"])).unwrap();

    let client = FixedCompletion::new("device: {}\n");
    run_batch(
        PipelineKind::HardwareSheets,
        &config(input.path(), output.path()),
        &client,
    )
    .await
    .unwrap();

    let prompts = client.seen_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(
        prompts[0].ends_with("A\nB"),
        "prompt should end with the joined page texts, got: {:?}",
        prompts[0]
    );
    assert!(output.path().join("doc1.yaml").is_file());
}

#[tokio::test]
async fn corrupt_pdf_is_skipped_and_batch_continues() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("broken.pdf"), "definitely not a pdf").unwrap();
    fs::write(input.path().join("ok.pdf"), pdf_with_pages(&["Relay module"])).unwrap();

    let client = FixedCompletion::new("device: relay\n");
    let summary = run_batch(
        PipelineKind::HardwareSheets,
        &config(input.path(), output.path()),
        &client,
    )
    .await
    .unwrap();

    assert_eq!(summary.matched, 2);
    assert_eq!(summary.written, 1);
    assert_eq!(summary.skipped, 1);
    assert!(!output.path().join("broken.yaml").exists());
    assert!(output.path().join("ok.yaml").is_file());
}

#[tokio::test]
async fn completion_failure_skips_that_file_only() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(
        input.path().join("flaky.pdf"),
        pdf_with_pages(&["UNSTABLE-DEVICE"]),
    )
    .unwrap();
    fs::write(input.path().join("solid.pdf"), pdf_with_pages(&["Solid relay"])).unwrap();

    let client = PoisonedCompletion {
        poison: "UNSTABLE-DEVICE".into(),
    };
    let summary = run_batch(
        PipelineKind::HardwareSheets,
        &config(input.path(), output.path()),
        &client,
    )
    .await
    .unwrap();

    assert_eq!(summary.matched, 2);
    assert_eq!(summary.written, 1);
    assert_eq!(summary.skipped, 1);
    assert!(!output.path().join("flaky.yaml").exists());
    assert!(output.path().join("solid.yaml").is_file());
}

// ── Driver-level behaviour ───────────────────────────────────────────────────

#[tokio::test]
async fn rerun_overwrites_with_identical_content() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("foo.cpp"), "int x;").unwrap();

    let cfg = config(input.path(), output.path());
    let client = FixedCompletion::new("# foo");

    run_batch(PipelineKind::ApiDocs, &cfg, &client).await.unwrap();
    let first = fs::read_to_string(output.path().join("foo.md")).unwrap();

    run_batch(PipelineKind::ApiDocs, &cfg, &client).await.unwrap();
    let second = fs::read_to_string(output.path().join("foo.md")).unwrap();

    assert_eq!(first, second);
    assert_eq!(second, "# foo");
}

#[tokio::test]
async fn output_directory_is_created_if_absent() {
    let input = tempfile::tempdir().unwrap();
    let output_root = tempfile::tempdir().unwrap();
    let output = output_root.path().join("nested/out");
    fs::write(input.path().join("foo.cpp"), "int x;").unwrap();

    let client = FixedCompletion::new("# foo");
    run_batch(
        PipelineKind::ApiDocs,
        &config(input.path(), &output),
        &client,
    )
    .await
    .unwrap();

    assert!(output.join("foo.md").is_file());
}

#[tokio::test]
async fn missing_input_dir_is_fatal() {
    let output = tempfile::tempdir().unwrap();
    let client = FixedCompletion::new("unused");

    let result = run_batch(
        PipelineKind::ApiDocs,
        &config(Path::new("/no/such/input"), output.path()),
        &client,
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn empty_input_dir_yields_empty_summary() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let client = FixedCompletion::new("unused");
    let summary = run_batch(
        PipelineKind::HardwareSheets,
        &config(input.path(), output.path()),
        &client,
    )
    .await
    .unwrap();

    assert_eq!(summary, batchdoc::BatchSummary::default());
    assert!(client.seen_prompts().is_empty());
}
