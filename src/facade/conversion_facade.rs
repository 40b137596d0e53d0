use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::config::ports::ProgressPort;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionInput, ConversionJob, ConversionOutput, OutputLayout};
use crate::models::file::{FileCollectInput, SourceFile};
use crate::models::progress::ProgressEvent;
use crate::service::combine::CombineService;
use crate::service::file::{
    combined_output_path, flat_base_name, generate_unique_filename, mirror_destination,
    nested_output_dir, resolve_output_dir, FileService,
};
use crate::service::render::RenderService;
use crate::service::traits::i_service::{CombineServiceTrait, FileServiceTrait, RenderServiceTrait};

pub struct ConversionFacade {
    file_service: Box<dyn FileServiceTrait>,
    render_service: Box<dyn RenderServiceTrait>,
    combine_service: Box<dyn CombineServiceTrait>,
}

impl ConversionFacade {
    pub fn new(
        file_service: Box<dyn FileServiceTrait>,
        render_service: Box<dyn RenderServiceTrait>,
        combine_service: Box<dyn CombineServiceTrait>,
    ) -> Self {
        ConversionFacade {
            file_service,
            render_service,
            combine_service,
        }
    }
}

impl Default for ConversionFacade {
    fn default() -> Self {
        ConversionFacade::new(
            Box::new(FileService::new()),
            Box::new(RenderService::new()),
            Box::new(CombineService::new()),
        )
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn execute_conversion(&self, input: ConversionInput, progress: &dyn ProgressPort) -> io::Result<ConversionOutput> {
        let source_dir = resolve_source_dir(&input.source_dir)?;
        let output_dir = resolve_output_dir(&source_dir, input.output_dir.as_deref())?;
        fs::create_dir_all(&output_dir)?;
        let output_dir = fs::canonicalize(&output_dir)?;

        info!("來源目錄：{}", source_dir.display());
        info!("輸出目錄：{}", output_dir.display());

        // 輸出目錄位於來源目錄內時不走訪，避免轉換上次的輸出
        let skip_dir = nested_output_dir(&source_dir, &output_dir);
        let collected = self.file_service.collect_files(FileCollectInput {
            root: source_dir.clone(),
            skip_dir,
        })?;

        let files = collected.files;
        progress.report(&ProgressEvent::Scanned {
            files: files.iter().map(|file| file.relative.clone()).collect(),
            output_dir: output_dir.clone(),
        });

        let mut output = ConversionOutput::empty(source_dir.clone(), output_dir.clone());
        output.total_files = files.len();
        if files.is_empty() {
            warn!("{} 中沒有可轉換的檔案", source_dir.display());
            return Ok(output);
        }

        if input.combine {
            self.process_combined(&files, &source_dir, &mut output, progress);
        } else {
            self.process_individual(&files, input.layout, &output_dir, &mut output, progress);
        }

        info!(
            "批次完成：成功 {}，失敗 {}",
            output.succeeded, output.failed
        );
        Ok(output)
    }
}

impl ConversionFacade {
    fn process_combined(
        &self,
        files: &[SourceFile],
        source_dir: &Path,
        output: &mut ConversionOutput,
        progress: &dyn ProgressPort,
    ) {
        let destination = combined_output_path(&output.output_dir, source_dir);
        progress.report(&ProgressEvent::Combining {
            total: files.len(),
            destination: destination.clone(),
        });

        let success = self.combine_service.combine(files, &destination, source_dir);
        if success {
            output.succeeded = files.len();
        } else {
            output.failed = files.len();
        }
        output.combined_path = Some(destination.clone());
        progress.report(&ProgressEvent::Combined { destination, success });
    }

    fn process_individual(
        &self,
        files: &[SourceFile],
        layout: OutputLayout,
        output_dir: &Path,
        output: &mut ConversionOutput,
        progress: &dyn ProgressPort,
    ) {
        let total = files.len();
        for (index, file) in files.iter().enumerate() {
            let index = index + 1;
            progress.report(&ProgressEvent::FileStarted {
                index,
                total,
                relative: file.relative.clone(),
            });

            let (destination, success) = match destination_for(layout, output_dir, &file.relative) {
                Ok(destination) => {
                    let job = ConversionJob {
                        source: file.path.clone(),
                        destination,
                    };
                    let success = self.render_service.convert_file(file.category, &job);
                    (Some(job.destination), success)
                }
                Err(e) => {
                    error!("無法建立 {} 的輸出路徑：{}", file.relative.display(), e);
                    (None, false)
                }
            };

            if success {
                output.succeeded += 1;
            } else {
                output.failed += 1;
            }
            progress.report(&ProgressEvent::FileFinished {
                index,
                total,
                relative: file.relative.clone(),
                destination,
                success,
            });
        }
    }
}

fn destination_for(layout: OutputLayout, output_dir: &Path, relative: &Path) -> io::Result<PathBuf> {
    match layout {
        OutputLayout::Mirror => {
            let destination = mirror_destination(output_dir, relative);
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)?;
            }
            Ok(destination)
        }
        OutputLayout::Flat => Ok(generate_unique_filename(output_dir, &flat_base_name(relative))),
    }
}

fn resolve_source_dir(path: &Path) -> io::Result<PathBuf> {
    if !path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("目錄 '{}' 不存在", path.display()),
        ));
    }
    if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{}' 不是目錄", path.display()),
        ));
    }
    fs::canonicalize(path)
}
