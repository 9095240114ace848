//! CLI: infer → classes in the chosen language, printed or written out.
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

use crate::{EmittedFile, GenerationContext, SourceFormat, TargetLanguage};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer a class schema from JSON documents and emit source code for it
#[derive(Parser, Debug)]
#[command(name = "json-classgen", version)]
pub struct CommandLineInterface {
    /// more logging on stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and emit one class file per object
    Generate(GenerateOut),
    /// list the supported target languages
    Languages,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// source format; defaults to each input's file extension
    #[arg(long)]
    format: Option<SourceFormat>,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// target language (see `languages`)
    #[arg(long, short)]
    lang: TargetLanguage,

    /// top-level class name (default: generated_from_<format>)
    #[arg(long)]
    root_name: Option<String>,

    /// directory to write files into (stdout if omitted)
    #[arg(long, short)]
    out_dir: Option<PathBuf>,

    /// fail on duplicate class file names instead of suffixing them
    #[arg(long)]
    strict: bool,

    /// overwrite files that already exist
    #[arg(long)]
    force: bool,

    /// print to stdout even when --out-dir is given
    #[arg(long)]
    dry_run: bool,

    /// print a JSON listing of the generated files instead of banners
    #[arg(long)]
    json: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// With several inputs and no --root-name, each root class is named
    /// after its input's file stem so the roots cannot clash.
    fn context_for(&self, path: &Path, base: &GenerationContext, several: bool) -> anyhow::Result<GenerationContext> {
        let source = match (self.format, path.extension()) {
            (Some(format), _) => format,
            (None, Some(ext)) => ext.to_string_lossy().parse::<SourceFormat>()?,
            (None, None) => SourceFormat::Json,
        };
        let root_name = match (&base.root_name, path.file_stem()) {
            (None, Some(stem)) if several => Some(stem.to_string_lossy().into_owned()),
            (root_name, _) => root_name.clone(),
        };
        Ok(GenerationContext { source, root_name, ..base.clone() })
    }

    /// Read, decode and generate every input, in parallel. Results keep input order.
    fn generate_all(&self, base: &GenerationContext) -> anyhow::Result<Vec<(PathBuf, Vec<EmittedFile>)>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let several = source_paths.len() > 1;
        source_paths
            .into_par_iter()
            .map(|source_path| -> anyhow::Result<_> {
                let files = self
                    .generate_one(&source_path, base, several)
                    .with_context(|| format!("failed to generate from {}", source_path.display()))?;
                Ok((source_path, files))
            })
            .collect()
    }

    fn generate_one(
        &self,
        source_path: &Path,
        base: &GenerationContext,
        several: bool,
    ) -> anyhow::Result<Vec<EmittedFile>> {
        let ctx = self.context_for(source_path, base, several)?;
        let source = std::fs::read_to_string(source_path).context("failed to read source file")?;
        let value = ctx.source.decode(&source)?;
        let value = match self.json_pointer.as_deref() {
            None => &value,
            Some(pointer) => match value.pointer(pointer) {
                Some(node) => node,
                None => bail!("JSON pointer {pointer:?} selects nothing"),
            },
        };
        Ok(crate::generate_from_value(value, &ctx)?)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Languages => {
                let mut stdout = io::stdout().lock();
                for lang in TargetLanguage::ALL {
                    let profile = lang.profile();
                    let aliases = lang.aliases().join(", ");
                    writeln!(stdout, "{:<12} {:<7} {aliases}", lang.id(), profile.extension)?;
                }
                Ok(())
            }
            Command::Generate(target) => {
                let base = GenerationContext {
                    lenient: !target.strict,
                    root_name: target.root_name.clone(),
                    output_hint: target.out_dir.clone(),
                    ..GenerationContext::new(target.lang)
                };
                let outputs = target.input_settings.generate_all(&base)?;
                match target.out_dir.as_ref() {
                    Some(out_dir) if !target.dry_run => {
                        write_outputs(&outputs, out_dir, target.force)?;
                        eprintln!(
                            "{}",
                            "Review the generated class names and field types before using them.".yellow()
                        );
                    }
                    _ if target.json => print_json(&outputs, &mut io::stdout().lock())?,
                    _ => {
                        let mut stdout = io::stdout().lock();
                        for (_, files) in &outputs {
                            print_files(files, &mut stdout)?;
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// PERSISTENCE
// ————————————————————————————————————————————————————————————————————————————

/// Write each file into `out_dir`. Existing files are an error unless `force`.
pub fn write_files(files: &[EmittedFile], out_dir: &Path, force: bool) -> anyhow::Result<Vec<PathBuf>> {
    write_outputs(&[(PathBuf::new(), files.to_vec())], out_dir, force)
}

/// Write every input's files into `out_dir`, all or nothing.
///
/// Each target path is checked before the first file is opened: two inputs
/// generating the same file name, or an existing file without `force`, fail
/// the whole batch with nothing written.
pub fn write_outputs(
    outputs: &[(PathBuf, Vec<EmittedFile>)],
    out_dir: &Path,
    force: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut planned = IndexMap::<PathBuf, (&Path, &EmittedFile)>::new();
    for (input, files) in outputs {
        for file in files {
            let path = out_dir.join(&file.file_name);
            if let Some((other, _)) = planned.get(&path) {
                bail!(
                    "{} and {} both generate {}; write them to separate output directories",
                    other.display(),
                    input.display(),
                    path.display()
                );
            }
            if !force && path.exists() {
                bail!("{} already exists; pass --force to overwrite", path.display());
            }
            planned.insert(path, (input.as_path(), file));
        }
    }

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;
    let mut written = Vec::with_capacity(planned.len());
    for (path, (_, file)) in planned {
        write_one(&path, file, force)?;
        eprintln!("{} {}", "Wrote out file".green(), path.display());
        written.push(path);
    }
    Ok(written)
}

/// Scoped open/write/close of one file.
fn write_one(path: &Path, file: &EmittedFile, force: bool) -> anyhow::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut handle = match options.open(path) {
        Ok(handle) => handle,
        Err(error) if error.kind() == io::ErrorKind::AlreadyExists => {
            bail!("{} already exists; pass --force to overwrite", path.display())
        }
        Err(error) => {
            return Err(error).with_context(|| format!("failed to open {}", path.display()));
        }
    };
    handle
        .write_all(file.source_text.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))
}

/// `==> name <==` banner, then the source text.
pub fn print_files(files: &[EmittedFile], out: &mut impl Write) -> io::Result<()> {
    for file in files {
        writeln!(out, "==> {} <==", file.file_name)?;
        out.write_all(file.source_text.as_bytes())?;
        writeln!(out)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct Listing<'a> {
    input: &'a Path,
    files: &'a [EmittedFile],
}

/// One `{input, files}` entry per input, pretty-printed.
pub fn print_json(outputs: &[(PathBuf, Vec<EmittedFile>)], out: &mut impl Write) -> anyhow::Result<()> {
    let listing: Vec<_> = outputs
        .iter()
        .map(|(input, files)| Listing { input, files })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &listing)?;
    writeln!(out)?;
    Ok(())
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_flags() {
        let cli = CommandLineInterface::try_parse_from([
            "json-classgen", "-v", "generate", "--lang", "rb", "-i", "a.json", "b.json", "--strict",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.cmd {
            Command::Generate(target) => {
                assert_eq!(target.lang, TargetLanguage::Ruby);
                assert_eq!(target.input_settings.input, ["a.json", "b.json"]);
                assert!(target.strict);
                assert!(target.out_dir.is_none());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_language() {
        let err = CommandLineInterface::try_parse_from(["json-classgen", "generate", "--lang", "cobol", "-i", "a.json"])
            .unwrap_err();
        assert!(err.to_string().contains("cobol"));
    }

    #[test]
    fn format_comes_from_extension_unless_given() {
        let settings = InputSettings { format: None, json_pointer: None, input: vec![] };
        let base = GenerationContext::new(TargetLanguage::Java);
        assert_eq!(settings.context_for(Path::new("x.JSON"), &base, false).unwrap().source, SourceFormat::Json);
        assert_eq!(settings.context_for(Path::new("noext"), &base, false).unwrap().source, SourceFormat::Json);
        let err = settings.context_for(Path::new("x.yaml"), &base, false).unwrap_err();
        assert!(err.to_string().contains("yaml"));

        let forced = InputSettings { format: Some(SourceFormat::Json), ..settings };
        assert!(forced.context_for(Path::new("x.yaml"), &base, false).is_ok());
    }

    #[test]
    fn several_inputs_name_roots_after_their_files() {
        let settings = InputSettings { format: None, json_pointer: None, input: vec![] };
        let base = GenerationContext::new(TargetLanguage::Ruby);
        let one = settings.context_for(Path::new("in/orders.json"), &base, false).unwrap();
        assert_eq!(one.root_name, None);
        let many = settings.context_for(Path::new("in/orders.json"), &base, true).unwrap();
        assert_eq!(many.root_name.as_deref(), Some("orders"));

        let named = base.with_root_name("order");
        let many = settings.context_for(Path::new("in/orders.json"), &named, true).unwrap();
        assert_eq!(many.root_name.as_deref(), Some("order"));
    }

    #[test]
    fn json_listing_carries_every_file() {
        let outputs = vec![(
            PathBuf::from("a.json"),
            vec![EmittedFile {
                logical_name: "A".into(),
                file_name: "a.rb".into(),
                source_text: "class A\nend\n".into(),
                origin: "$".into(),
            }],
        )];
        let mut buf = Vec::new();
        print_json(&outputs, &mut buf).unwrap();
        let listing: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(listing[0]["input"], "a.json");
        assert_eq!(listing[0]["files"][0]["logical_name"], "A");
        assert_eq!(listing[0]["files"][0]["file_name"], "a.rb");
        assert_eq!(listing[0]["files"][0]["origin"], "$");
    }

    #[test]
    fn banners_precede_each_file() {
        let files = vec![EmittedFile {
            logical_name: "Root".into(),
            file_name: "Root.java".into(),
            source_text: "class Root {}\n".into(),
            origin: "$".into(),
        }];
        let mut buf = Vec::new();
        print_files(&files, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "==> Root.java <==\nclass Root {}\n\n");
    }
}
