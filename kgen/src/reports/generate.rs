//! Generate command report data structures.

use std::path::PathBuf;

use super::{
    Stats,
    output::{Output, Report},
};

/// Report data from library generation.
#[derive(Debug)]
pub struct GenerateReport {
    pub api_version: Option<String>,
    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,
    pub stats: Stats,
    pub result: GenerationResult,
}

#[derive(Debug)]
pub enum GenerationResult {
    /// The library was written to disk.
    Written { path: PathBuf },
    /// Dry run; the library was not written.
    Preview { file_name: String, content: String },
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        match &self.result {
            GenerationResult::Preview { file_name, content } => {
                out.divider(file_name);
                out.preformatted(content.trim_end());
                out.divider("Summary");
                out.preformatted("1 file would be generated");
            }
            GenerationResult::Written { path } => {
                if let Some(api_version) = &self.api_version {
                    out.key_value("apiVersion", api_version);
                }
                self.stats.render(out);
                out.newline();
                out.key_value("Generated", &path.display().to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::RecordingOutput;

    #[test]
    fn test_render_preview() {
        let report = GenerateReport {
            api_version: None,
            warnings: vec!["odd".into()],
            stats: Stats::default(),
            result: GenerationResult::Preview {
                file_name: "k8s.libsonnet".into(),
                content: "{\n}\n".into(),
            },
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            [
                "warning: odd",
                "── k8s.libsonnet ──",
                "{\n}",
                "── Summary ──",
                "1 file would be generated",
            ]
        );
    }

    #[test]
    fn test_render_written() {
        let report = GenerateReport {
            api_version: Some("v1".into()),
            warnings: Vec::new(),
            stats: Stats {
                types: 3,
                ..Stats::default()
            },
            result: GenerationResult::Written {
                path: PathBuf::from("lib/k8s.libsonnet"),
            },
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(out.lines[0], "apiVersion: v1");
        assert_eq!(out.lines[1], "  types: 3");
        assert_eq!(out.lines.last().map(String::as_str), Some("Generated: lib/k8s.libsonnet"));
    }
}
