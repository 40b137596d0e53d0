use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use log::{debug, warn};
use pathdiff::diff_paths;
use walkdir::WalkDir;

use crate::models::file::{FileCollectInput, FileCollectOutput, SourceFile};
use crate::models::format::classify;
use crate::service::traits::i_service::FileServiceTrait;

/// 預設輸出子目錄名稱
pub const DEFAULT_OUTPUT_DIR: &str = "pdf";
const PDF_EXTENSION: &str = "pdf";

pub struct FileService;

impl FileService {
    pub fn new() -> Self {
        FileService
    }
}

impl Default for FileService {
    fn default() -> Self {
        Self::new()
    }
}

impl FileServiceTrait for FileService {
    fn collect_files(&self, input: FileCollectInput) -> io::Result<FileCollectOutput> {
        if !input.root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("'{}' 不是目錄", input.root.display()),
            ));
        }

        let skip_dir = input.skip_dir.as_deref();
        let walker = WalkDir::new(&input.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| match skip_dir {
                Some(skip) => entry.depth() == 0 || entry.path() != skip,
                None => true,
            });

        let mut output = FileCollectOutput::default();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("無法讀取項目，略過：{}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Some(category) = classify(path) else {
                debug!("不支援的格式，略過：{}", path.display());
                output.skipped_unsupported += 1;
                continue;
            };
            let relative = diff_paths(path, &input.root).unwrap_or_else(|| path.to_path_buf());
            output.files.push(SourceFile {
                path: path.to_path_buf(),
                relative,
                category,
            });
        }

        debug!(
            "收集到 {} 個可轉換檔案，{} 個不支援",
            output.files.len(),
            output.skipped_unsupported
        );
        Ok(output)
    }
}

/// 未指定輸出目錄時使用 `<root>/pdf`
pub fn default_output_dir(root: &Path) -> PathBuf {
    root.join(DEFAULT_OUTPUT_DIR)
}

/// 指定的輸出目錄轉為絕對路徑，未指定時為 `<root>/pdf`；已存在者取正規路徑
pub fn resolve_output_dir(root: &Path, output: Option<&Path>) -> io::Result<PathBuf> {
    let dir = match output {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => std::env::current_dir()?.join(dir),
        None => default_output_dir(root),
    };
    if dir.exists() {
        fs::canonicalize(&dir)
    } else {
        Ok(dir)
    }
}

/// 輸出目錄位於來源目錄內時，走訪需略過該子樹
pub fn nested_output_dir(root: &Path, output_dir: &Path) -> Option<PathBuf> {
    output_dir.starts_with(root).then(|| output_dir.to_path_buf())
}

/// 保留目錄結構：`<out>/<相對父目錄>/<主檔名>.pdf`
pub fn mirror_destination(output_dir: &Path, relative: &Path) -> PathBuf {
    let parent = relative.parent().unwrap_or_else(|| Path::new(""));
    output_dir.join(parent).join(pdf_file_name(relative))
}

/// 平面模式的基本檔名：子目錄中的檔案以父目錄路徑（分隔符換成 `_`）為前綴
pub fn flat_base_name(relative: &Path) -> String {
    let stem = file_stem(relative);
    let parents: Vec<String> = relative
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|component| match component {
                    Component::Normal(name) => Some(name.to_string_lossy().to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    if parents.is_empty() {
        stem
    } else {
        format!("{}_{}", parents.join("_"), stem)
    }
}

/// 在輸出目錄中找出未被使用的檔名：`base.pdf`、`base_1.pdf`、`base_2.pdf`…
pub fn generate_unique_filename(output_dir: &Path, base_name: &str) -> PathBuf {
    let mut candidate = output_dir.join(format!("{}.{}", base_name, PDF_EXTENSION));
    let mut counter = 1;
    while candidate.exists() {
        candidate = output_dir.join(format!("{}_{}.{}", base_name, counter, PDF_EXTENSION));
        counter += 1;
    }
    candidate
}

/// 合併模式的輸出檔：`<out>/<來源目錄名稱>_combined.pdf`
pub fn combined_output_path(output_dir: &Path, root: &Path) -> PathBuf {
    let name = root
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "files".to_string());
    output_dir.join(format!("{}_combined.{}", name, PDF_EXTENSION))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn pdf_file_name(path: &Path) -> String {
    format!("{}.{}", file_stem(path), PDF_EXTENSION)
}
