//! 既有 PDF 直接複製。

use std::fs::{self, File};
use std::path::Path;

use crate::error::{ConvertError, Result};

/// 逐位元組複製並保留修改時間；來源與目的地相同時拒絕
pub fn convert(input: &Path, output: &Path) -> Result<()> {
    if output.exists() && fs::canonicalize(input)? == fs::canonicalize(output)? {
        return Err(ConvertError::SameFile(input.to_path_buf()));
    }

    fs::copy(input, output)?;
    let modified = fs::metadata(input)?.modified()?;
    File::options().write(true).open(output)?.set_modified(modified)?;
    Ok(())
}
