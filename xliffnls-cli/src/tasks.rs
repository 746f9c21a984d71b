//! The build tasks: each one turns a set of XLIFF files into artifacts on disk.
//!
//! Files of one task are converted in parallel and fail independently. The only ordering
//! constraint is that `package.nls.json` must exist before localized metadata is merged
//! against it, which [`run_all`] enforces by running those two phases in sequence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use tracing::{debug, error, info, warn};
use xliffnls::{
    ArtifactKind, ConstantsModule, I18nJson, Locale, PackageNls, ProjectLayout, ReferenceKeySet,
    XliffDocument, naming, traits::Generator, traits::Parser,
};

use crate::path_glob::{FileSelector, WalkFailure};

/// Outcome of one task.
#[derive(Debug, Default)]
pub struct TaskReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<TaskFailure>,
}

#[derive(Debug)]
pub struct TaskFailure {
    pub input: PathBuf,
    pub error: anyhow::Error,
}

impl TaskReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn merge(mut self, other: TaskReport) -> TaskReport {
        self.written.extend(other.written);
        self.failures.extend(other.failures);
        self
    }

    fn record(&mut self, input: &Path, result: Result<PathBuf>) {
        match result {
            Ok(output) => {
                info!(input = %input.display(), output = %output.display(), "wrote artifact");
                self.written.push(output);
            }
            Err(err) => {
                error!(input = %input.display(), "{:#}", err);
                self.failures.push(TaskFailure {
                    input: input.to_path_buf(),
                    error: err,
                });
            }
        }
    }
}

impl FromIterator<(PathBuf, Result<PathBuf>)> for TaskReport {
    fn from_iter<T: IntoIterator<Item = (PathBuf, Result<PathBuf>)>>(iter: T) -> Self {
        let mut report = TaskReport::default();
        for (input, result) in iter {
            report.record(&input, result);
        }
        report
    }
}

/// Returns true when `locales` is empty or contains `locale`.
fn selected(locales: &[Locale], locale: Locale) -> bool {
    locales.is_empty() || locales.contains(&locale)
}

/// The locale directory right below `xliff/`, if it is one.
fn locale_dir(layout: &ProjectLayout, input: &Path) -> Option<Locale> {
    input
        .strip_prefix(layout.xliff_dir())
        .ok()?
        .components()
        .next()?
        .as_os_str()
        .to_str()?
        .parse()
        .ok()
}

fn file_name(input: &Path) -> Result<&str> {
    input
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("{} has no usable file name", input.display()))
}

fn read_dictionary(input: &Path, kind: ArtifactKind) -> Result<xliffnls::TranslationDictionary> {
    let doc = XliffDocument::read_from(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    debug!(input = %input.display(), units = doc.units.len(), "parsed xliff");
    Ok(doc.to_dictionary(kind.escape_mode()))
}

/// Entries the walk could not read count as failed inputs.
fn walk_failures(
    unreadable: Vec<WalkFailure>,
) -> impl Iterator<Item = (PathBuf, Result<PathBuf>)> {
    unreadable.into_iter().map(|failure| {
        let error = anyhow::Error::new(failure.error).context("failed to read directory entry");
        (failure.path, Err(error))
    })
}

fn write_artifact<G: Generator>(artifact: &G, output: PathBuf) -> Result<PathBuf> {
    artifact
        .write_to(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(output)
}

/// Every non-English XLIFF except package metadata → `i18n/<dir>/<stem>.i18n.json`.
pub fn xliff_to_json(layout: &ProjectLayout, locales: &[Locale]) -> Result<TaskReport> {
    let selection = FileSelector::new(["**/*.xlf"])
        .excluding([
            format!("{}/**", Locale::DEFAULT.code()),
            "**/*localizedPackage.json.*.xlf".to_string(),
        ])
        .collect(&layout.xliff_dir())
        .map_err(|e| anyhow!(e))?;

    let inputs: Vec<PathBuf> = selection
        .files
        .into_iter()
        .filter(|input| {
            locales.is_empty() || locale_dir(layout, input).is_some_and(|l| selected(locales, l))
        })
        .collect();
    if inputs.is_empty() && selection.unreadable.is_empty() {
        warn!(dir = %layout.xliff_dir().display(), "no xliff files to convert to json");
    }

    Ok(inputs
        .into_par_iter()
        .map(|input| {
            let result = (|| -> Result<PathBuf> {
                let dict = read_dictionary(&input, ArtifactKind::I18nJson)?;
                let output = layout.i18n_output_path(&input)?;
                write_artifact(&I18nJson::from_dictionary(&dict), output)
            })();
            (input, result)
        })
        .collect::<Vec<_>>()
        .into_iter()
        .chain(walk_failures(selection.unreadable))
        .collect())
}

/// The English constants XLIFF → `localizedConstants.ts`.
pub fn xliff_to_constants(layout: &ProjectLayout) -> TaskReport {
    let input = layout.constants_source();
    let result = read_dictionary(&input, ArtifactKind::Constants).and_then(|dict| {
        write_artifact(
            &ConstantsModule::from_dictionary(&dict),
            layout.constants_output_path(),
        )
    });
    std::iter::once((input, result)).collect()
}

/// The English package XLIFF → `package.nls.json`.
pub fn generate_english_package_nls(layout: &ProjectLayout) -> TaskReport {
    let input = layout.package_xliff_source(Locale::DEFAULT);
    let result = read_dictionary(&input, ArtifactKind::PackageNls).and_then(|dict| {
        let nls = PackageNls::generate(&dict);
        write_artifact(&nls, layout.package_nls_output_path(nls.locale))
    });
    std::iter::once((input, result)).collect()
}

/// Every other package XLIFF → `package.nls.<tag>.json`, merged against `package.nls.json`.
///
/// Fails as a whole when the English `package.nls.json` cannot be read.
pub fn xliff_to_package_nls(layout: &ProjectLayout, locales: &[Locale]) -> Result<TaskReport> {
    let reference_path = layout.reference_path();
    let reference = ReferenceKeySet::load(&reference_path)
        .with_context(|| format!("failed to load {}", reference_path.display()))?;
    debug!(keys = reference.len(), "loaded reference package metadata");

    let selection = FileSelector::new(["**/localizedPackage.json.*.xlf"])
        .excluding([format!(
            "{code}/localizedPackage.json.{code}.xlf",
            code = Locale::DEFAULT.code()
        )])
        .collect(&layout.xliff_dir())
        .map_err(|e| anyhow!(e))?;

    let jobs: Vec<(PathBuf, Result<Locale>)> = selection
        .files
        .into_iter()
        .map(|input| {
            let locale = file_name(&input).and_then(|name| {
                naming::locale_from_package_xliff_name(name).map_err(Into::into)
            });
            (input, locale)
        })
        .filter(|(input, locale)| match locale {
            Ok(locale) if locale.is_default() => {
                warn!(
                    input = %input.display(),
                    "skipping default-locale package xliff outside its directory"
                );
                false
            }
            Ok(locale) => selected(locales, *locale),
            Err(_) => true,
        })
        .collect();

    Ok(jobs
        .into_par_iter()
        .map(|(input, locale)| {
            let result = locale.and_then(|locale| {
                let dict = read_dictionary(&input, ArtifactKind::PackageNls)?;
                let nls = PackageNls::localize(&dict, &reference, locale);
                write_artifact(&nls, layout.package_nls_output_path(locale))
            });
            (input, result)
        })
        .collect::<Vec<_>>()
        .into_iter()
        .chain(walk_failures(selection.unreadable))
        .collect())
}

/// Runs every task. JSON and constants run alongside the package metadata phases, which run
/// English first.
pub fn run_all(layout: &ProjectLayout, locales: &[Locale]) -> Result<TaskReport> {
    let (plain, package) = rayon::join(
        || -> Result<TaskReport> {
            Ok(xliff_to_json(layout, locales)?.merge(xliff_to_constants(layout)))
        },
        || -> Result<TaskReport> {
            let english = generate_english_package_nls(layout);
            if !english.is_success() {
                warn!("skipping localized package metadata, package.nls.json was not generated");
                return Ok(english);
            }
            Ok(english.merge(xliff_to_package_nls(layout, locales)?))
        },
    );
    Ok(plain?.merge(package?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn unit(id: &str, source: &str, target: Option<&str>) -> String {
        match target {
            Some(target) => format!(
                "<trans-unit id=\"{id}\"><source>{source}</source>\
                 <target>{target}</target></trans-unit>"
            ),
            None => format!("<trans-unit id=\"{id}\"><source>{source}</source></trans-unit>"),
        }
    }

    fn xliff(units: &[String]) -> String {
        format!(
            "<?xml version=\"1.0\"?><xliff version=\"1.2\"><file><body>{}</body></file></xliff>",
            units.concat()
        )
    }

    #[test]
    fn test_json_task_mirrors_tree_and_skips_english_and_package() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        write(
            dir.path(),
            "localization/xliff/deu/constants/localizedConstants.deu.xlf",
            &xliff(&[unit("ok", "OK", Some("In Ordnung")), unit("cancel", "Cancel", None)]),
        );
        write(
            dir.path(),
            "localization/xliff/enu/constants/localizedConstants.enu.xlf",
            &xliff(&[unit("ok", "OK", None)]),
        );
        write(
            dir.path(),
            "localization/xliff/deu/localizedPackage.json.deu.xlf",
            &xliff(&[unit("title", "Title", Some("Titel"))]),
        );

        let report = xliff_to_json(&layout, &[]).unwrap();
        assert!(report.is_success());
        assert_eq!(report.written.len(), 1);

        let output = dir
            .path()
            .join("localization/i18n/deu/constants/localizedConstants.i18n.json");
        assert_eq!(report.written[0], output);
        assert_eq!(
            fs::read_to_string(output).unwrap(),
            "{\n\t\"ok\": \"In Ordnung\",\n\t\"cancel\": \"Cancel\"\n}\n"
        );
    }

    #[test]
    fn test_json_task_converts_files_hidden_by_ignore_rules() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        write(dir.path(), ".ignore", "*.xlf\n");
        write(dir.path(), "localization/xliff/deu/a.deu.xlf", &xliff(&[unit("a", "A", None)]));

        let report = xliff_to_json(&layout, &[]).unwrap();
        assert!(report.is_success());
        assert_eq!(
            report.written,
            vec![dir.path().join("localization/i18n/deu/a.i18n.json")]
        );
    }

    #[test]
    fn test_json_task_skips_prefixed_package_files() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        write(
            dir.path(),
            "localization/xliff/deu/extlocalizedPackage.json.deu.xlf",
            &xliff(&[unit("title", "Title", Some("Titel"))]),
        );
        write(dir.path(), "localization/xliff/deu/a.deu.xlf", &xliff(&[unit("a", "A", None)]));

        let report = xliff_to_json(&layout, &[]).unwrap();
        assert_eq!(
            report.written,
            vec![dir.path().join("localization/i18n/deu/a.i18n.json")]
        );
        assert!(!dir.path().join("localization/i18n/deu/extlocalizedPackage.i18n.json").exists());
    }

    #[test]
    fn test_walk_errors_are_failures() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let unreadable = vec![WalkFailure {
            path: PathBuf::from("localization/xliff/deu"),
            error: ignore::Error::WithPath {
                path: PathBuf::from("localization/xliff/deu"),
                err: Box::new(ignore::Error::Io(io)),
            },
        }];
        let report: TaskReport = walk_failures(unreadable).collect();
        assert!(!report.is_success());
        assert!(report.written.is_empty());
        assert_eq!(report.failures[0].input, PathBuf::from("localization/xliff/deu"));
        let message = format!("{:#}", report.failures[0].error);
        assert!(message.contains("failed to read directory entry"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_json_task_locale_filter() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        write(dir.path(), "localization/xliff/deu/a.deu.xlf", &xliff(&[unit("a", "A", None)]));
        write(dir.path(), "localization/xliff/fra/a.fra.xlf", &xliff(&[unit("a", "A", None)]));

        let report = xliff_to_json(&layout, &[Locale::Fra]).unwrap();
        assert_eq!(
            report.written,
            vec![dir.path().join("localization/i18n/fra/a.i18n.json")]
        );
    }

    #[test]
    fn test_one_bad_file_does_not_stop_the_others() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        write(
            dir.path(),
            "localization/xliff/deu/bad.deu.xlf",
            "<xliff><trans-unit><source>x</source></trans-unit></xliff>",
        );
        write(dir.path(), "localization/xliff/deu/good.deu.xlf", &xliff(&[unit("a", "A", None)]));

        let report = xliff_to_json(&layout, &[]).unwrap();
        assert_eq!(report.written.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].input.ends_with("bad.deu.xlf"));
        assert!(format!("{:#}", report.failures[0].error).contains("missing 'id'"));
    }

    #[test]
    fn test_constants_task() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        write(
            dir.path(),
            "localization/xliff/enu/constants/localizedConstants.enu.xlf",
            &xliff(&[unit("greeting", "Hello", None), unit("tip", "Don't", None)]),
        );
        let report = xliff_to_constants(&layout);
        assert!(report.is_success());
        let text =
            fs::read_to_string(dir.path().join("src/constants/localizedConstants.ts")).unwrap();
        assert!(text.contains("export let greeting = 'Hello';\r\n"));
        assert!(text.contains("\ttip = localize('tip', 'Don\\'t');\r\n"));
    }

    #[test]
    fn test_constants_task_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let report = xliff_to_constants(&ProjectLayout::new(dir.path()));
        assert_eq!(report.failures.len(), 1);
        assert!(report.written.is_empty());
    }

    #[test]
    fn test_localized_package_requires_reference() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        write(
            dir.path(),
            "localization/xliff/deu/localizedPackage.json.deu.xlf",
            &xliff(&[unit("title", "Title", Some("Titel"))]),
        );
        let err = xliff_to_package_nls(&layout, &[]).unwrap_err();
        assert!(format!("{:#}", err).contains("reference package metadata not found"));
    }

    #[test]
    fn test_run_all_orders_package_phases() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        write(
            dir.path(),
            "localization/xliff/enu/localizedPackage.json.enu.xlf",
            &xliff(&[unit("title", "Title", None), unit("desc", "Says \"hi\"", None)]),
        );
        write(
            dir.path(),
            "localization/xliff/ptb/localizedPackage.json.ptb.xlf",
            &xliff(&[unit("title", "Title", Some("Título")), unit("desc", "Says", Some(""))]),
        );
        write(
            dir.path(),
            "localization/xliff/enu/constants/localizedConstants.enu.xlf",
            &xliff(&[unit("greeting", "Hello", None)]),
        );

        let report = run_all(&layout, &[]).unwrap();
        assert!(report.is_success(), "{:?}", report.failures);
        assert_eq!(
            fs::read_to_string(dir.path().join("package.nls.json")).unwrap(),
            "{\r\n\"title\":\"Title\",\r\n\"desc\":\"Says 'hi'\"\r\n}\r\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("package.nls.pt-br.json")).unwrap(),
            "{\r\n\"title\":\"Título\",\r\n\"desc\":\"Says 'hi'\"\r\n}\r\n"
        );
        assert!(dir.path().join("src/constants/localizedConstants.ts").exists());
    }

    #[test]
    fn test_unknown_locale_in_package_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        write(dir.path(), "package.nls.json", "{\"title\":\"Title\"}");
        write(
            dir.path(),
            "localization/xliff/xyz/localizedPackage.json.xyz.xlf",
            &xliff(&[unit("title", "Title", Some("?"))]),
        );
        let report = xliff_to_package_nls(&layout, &[]).unwrap();
        assert_eq!(report.failures.len(), 1);
        assert!(format!("{:#}", report.failures[0].error).contains("unknown locale code `xyz`"));
        assert!(report.written.is_empty());
    }
}
