//! First-pages PDF snapshot through a headless Chromium-family browser.
//!
//! The document is copied next to itself with an injected style and script,
//! so relative assets still resolve. The injected script runs the configured
//! in-page hooks, hides every page after the first N and hides buttons. The
//! browser then prints the copy to a Letter-sized PDF.
//!
//! Page scripts get the browser's virtual-time budget (`settle`) to finish
//! before printing, and the whole run is bounded by `timeout`. The staging
//! copy and any partial output are temporary files, removed on every exit
//! path.

use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::ExportError;
use crate::config::PdfConfig;
use crate::debug;
use crate::document::Document;
use crate::utils::exec::{Cmd, FilterRule};

/// Browser names searched on PATH, in order.
pub const BROWSER_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
    "msedge",
];

/// Chromium startup noise on stderr.
static BROWSER_FILTER: FilterRule = FilterRule::new(&["[", "DevTools listening", "Fontconfig"]);

/// Letter at 96 dpi.
const WINDOW_SIZE: &str = "816,1056";

/// A finished snapshot.
#[derive(Debug)]
pub struct PdfSnapshot {
    pub browser: PathBuf,
    pub output: PathBuf,
    pub bytes: u64,
}

/// Print the first `config.pages` pages of `document` to `config.output`.
pub fn export_pdf(document: &Document, config: &PdfConfig) -> Result<PdfSnapshot, ExportError> {
    let browser = find_browser(config.browser.as_deref())?;
    debug!("pdf"; "using {}", browser.display());
    log_browser_version(&browser);

    let staged = stage_document(document, &injection(config))?;
    let target = pending_output(&config.output)?;

    let dir = staged.path().parent().unwrap_or(Path::new("."));
    Cmd::new(&browser)
        .args(browser_args(config, staged.path(), &target))
        .cwd(dir)
        .timeout(config.timeout())
        .filter(&BROWSER_FILTER)
        .run()?;

    let bytes = fs::metadata(&target).map(|m| m.len()).unwrap_or(0);
    if bytes == 0 {
        return Err(ExportError::MissingOutput(config.output.clone()));
    }

    target
        .persist(&config.output)
        .map_err(|e| ExportError::Output {
            path: config.output.clone(),
            source: e.error,
        })?;

    Ok(PdfSnapshot {
        browser,
        output: config.output.clone(),
        bytes,
    })
}

/// Resolve the browser: the configured program, or the first candidate on PATH.
pub fn find_browser(explicit: Option<&str>) -> Result<PathBuf, ExportError> {
    match explicit {
        Some(program) => which::which(program).map_err(|_| ExportError::BrowserNotFound {
            tried: format!("`{program}`"),
        }),
        None => BROWSER_CANDIDATES
            .iter()
            .find_map(|name| which::which(name).ok())
            .ok_or_else(|| ExportError::BrowserNotFound {
                tried: BROWSER_CANDIDATES.join(", "),
            }),
    }
}

fn log_browser_version(browser: &Path) {
    if !crate::logger::is_verbose() {
        return;
    }
    if let Ok(output) = Cmd::new(browser).arg("--version").run() {
        let version = String::from_utf8_lossy(&output.stdout);
        debug!("pdf"; "{}", version.trim());
    }
}

// ============================================================================
// Staging
// ============================================================================

/// Style and script appended to the staged copy.
fn injection(config: &PdfConfig) -> String {
    let mut script = String::new();
    for (object, method) in config.hook_calls() {
        let _ = writeln!(
            script,
            "  if (typeof {object} !== 'undefined' && {object} && typeof {object}.{method} === 'function') {{\n    try {{ {object}.{method}(); }} catch (e) {{ console.error(e); }}\n  }}"
        );
    }

    format!(
        r#"<style>
@page {{ size: Letter; margin: 0; }}
* {{ -webkit-print-color-adjust: exact; print-color-adjust: exact; }}
button {{ display: none !important; }}
</style>
<script>
window.addEventListener('load', function () {{
{script}  document.querySelectorAll('.page').forEach(function (page, i) {{
    if (i >= {pages}) page.style.display = 'none';
  }});
  document.body.classList.add('pdf-export-mode');
  document.querySelectorAll('button').forEach(function (b) {{ b.style.display = 'none'; }});
}});
</script>
"#,
        pages = config.pages,
    )
}

/// Insert `injection` before the last `</body>` (any case), or append it.
fn inject(html: &str, injection: &str) -> String {
    // ASCII lowercasing keeps byte offsets
    let position = html.to_ascii_lowercase().rfind("</body>");
    let mut out = String::with_capacity(html.len() + injection.len());
    match position {
        Some(at) => {
            out.push_str(&html[..at]);
            out.push_str(injection);
            out.push_str(&html[at..]);
        }
        None => {
            out.push_str(html);
            out.push_str(injection);
        }
    }
    out
}

/// Write the injected copy next to the document. Removed when dropped.
fn stage_document(document: &Document, injection: &str) -> Result<NamedTempFile, ExportError> {
    let path = document.path();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let staging_err = |source| ExportError::Staging {
        path: path.to_path_buf(),
        source,
    };

    let mut staged = tempfile::Builder::new()
        .prefix(".pagefix-print-")
        .suffix(".html")
        .tempfile_in(dir)
        .map_err(staging_err)?;
    staged
        .write_all(inject(document.text(), injection).as_bytes())
        .and_then(|()| staged.flush())
        .map_err(staging_err)?;
    Ok(staged)
}

/// Temporary file the browser prints into, renamed onto the output on success.
fn pending_output(output: &Path) -> Result<tempfile::TempPath, ExportError> {
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let output_err = |source| ExportError::Output {
        path: output.to_path_buf(),
        source,
    };

    fs::create_dir_all(dir).map_err(output_err)?;
    tempfile::Builder::new()
        .prefix(".pagefix-")
        .suffix(".pdf")
        .tempfile_in(dir)
        .map(NamedTempFile::into_temp_path)
        .map_err(output_err)
}

fn browser_args(config: &PdfConfig, staged: &Path, target: &Path) -> Vec<String> {
    vec![
        "--headless".into(),
        "--disable-gpu".into(),
        "--no-sandbox".into(),
        "--hide-scrollbars".into(),
        "--no-pdf-header-footer".into(),
        format!("--window-size={WINDOW_SIZE}"),
        format!("--virtual-time-budget={}", config.settle),
        format!("--print-to-pdf={}", target.display()),
        format!("file://{}", staged.display()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_inject_before_last_body_close() {
        let html = "<html><body><p>a</p></BODY><!-- </body> --></body></html>";
        let out = inject(html, "<X>");
        assert_eq!(out, "<html><body><p>a</p></BODY><!-- </body> --><X></body></html>");

        let out = inject("<html><body><p>a</p></BODY>", "<X>");
        assert_eq!(out, "<html><body><p>a</p><X></BODY>");
    }

    #[test]
    fn test_inject_appends_without_body_close() {
        assert_eq!(inject("<p>fragment</p>", "<X>"), "<p>fragment</p><X>");
    }

    #[test]
    fn test_injection_contents() {
        let config = PdfConfig {
            pages: 3,
            hooks: vec!["finalTouches.prepareForPDF".into(), "notAHook".into()],
            ..Default::default()
        };
        let injected = injection(&config);

        assert!(injected.contains("size: Letter; margin: 0;"));
        assert!(injected.contains("-webkit-print-color-adjust: exact; print-color-adjust: exact;"));
        assert!(injected.contains("if (i >= 3) page.style.display = 'none';"));
        assert!(injected.contains("typeof finalTouches.prepareForPDF === 'function'"));
        assert!(!injected.contains("notAHook"));
        assert!(injected.contains("classList.add('pdf-export-mode')"));
    }

    #[test]
    fn test_browser_args() {
        let config = PdfConfig::default();
        let args = browser_args(
            &config,
            Path::new("/site/.pagefix-print-1.html"),
            Path::new("/site/.pagefix-2.pdf"),
        );
        assert_eq!(args[0], "--headless");
        assert!(args.contains(&"--window-size=816,1056".to_string()));
        assert!(args.contains(&"--virtual-time-budget=4000".to_string()));
        assert!(args.contains(&"--print-to-pdf=/site/.pagefix-2.pdf".to_string()));
        assert_eq!(args.last().unwrap(), "file:///site/.pagefix-print-1.html");
    }

    #[test]
    fn test_missing_explicit_browser() {
        let err = find_browser(Some("pagefix-no-such-browser")).unwrap_err();
        assert!(matches!(err, ExportError::BrowserNotFound { .. }));
        assert!(err.to_string().contains("pagefix-no-such-browser"));
    }

    #[test]
    fn test_staged_copy_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guide.html");
        fs::write(&path, "<html><body></body></html>").unwrap();
        let document = Document::read(&path).unwrap();

        let staged = stage_document(&document, "<X>").unwrap();
        let staged_path = staged.path().to_path_buf();
        assert_eq!(staged_path.parent(), Some(dir.path()));
        assert_eq!(
            fs::read_to_string(&staged_path).unwrap(),
            "<html><body><X></body></html>"
        );

        drop(staged);
        assert!(!staged_path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_pending_output_creates_parent() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out/first.pdf");
        let pending = pending_output(&output).unwrap();
        assert_eq!(pending.parent(), Some(dir.path().join("out").as_path()));
        drop(pending);
        assert_eq!(fs::read_dir(dir.path().join("out")).unwrap().count(), 0);
    }
}
