//! XLSX / XLS 轉 PDF：逐工作表輸出儲存格文字。

use std::path::Path;

use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use chrono::{NaiveDateTime, TimeDelta};
use log::{debug, warn};

use crate::error::Result;
use crate::utils::pdf::{
    DrawingSurface, PdfCanvas, BOTTOM_MARGIN, CANVAS_LEFT, CANVAS_TOP_OFFSET, MAX_LINE_CHARS,
};
use crate::utils::text::truncate_chars;

/// 每個工作表最多輸出的列數與欄數
pub const MAX_ROWS: u32 = 50;
pub const MAX_COLUMNS: u32 = 10;

const CELL_SEPARATOR: &str = " | ";

/// 一個工作表左上角固定 50 × 10 範圍的文字
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRows {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl SheetRows {
    /// 固定取 A1 起的 50 × 10 範圍，範圍外或空白的儲存格為空字串
    pub fn from_range(name: &str, range: &Range<Data>) -> Self {
        let rows = (0..MAX_ROWS)
            .map(|row| {
                (0..MAX_COLUMNS)
                    .map(|col| range.get_value((row, col)).map(cell_to_string).unwrap_or_default())
                    .collect()
            })
            .collect();
        SheetRows {
            name: name.to_string(),
            rows,
        }
    }
}

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => if *b { "True" } else { "False" }.to_string(),
        Data::DateTime(dt) => excel_datetime_to_string(dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERR:{:?}", e),
    }
}

/// 日期為 `2024-01-05 13:30:00`，時間長度為 `1 day, 2:03:04`
fn excel_datetime_to_string(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        if let Some(duration) = dt.as_duration() {
            return format_duration(duration);
        }
    } else if let Some(datetime) = dt.as_datetime() {
        return format_datetime(datetime);
    }
    dt.as_f64().to_string()
}

fn format_datetime(datetime: NaiveDateTime) -> String {
    let micros = datetime.and_utc().timestamp_subsec_micros();
    if micros == 0 {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        format!("{}.{:06}", datetime.format("%Y-%m-%d %H:%M:%S"), micros)
    }
}

fn format_duration(duration: TimeDelta) -> String {
    let total_ms = duration.num_milliseconds();
    // 負值時天數向下取整，時分秒維持非負
    let days = total_ms.div_euclid(86_400_000);
    let rest = total_ms.rem_euclid(86_400_000);
    let (hours, minutes, seconds, millis) = (
        rest / 3_600_000,
        rest / 60_000 % 60,
        rest / 1000 % 60,
        rest % 1000,
    );

    let mut text = String::new();
    if days != 0 {
        let unit = if days.abs() == 1 { "day" } else { "days" };
        text.push_str(&format!("{} {}, ", days, unit));
    }
    text.push_str(&format!("{}:{:02}:{:02}", hours, minutes, seconds));
    if millis != 0 {
        text.push_str(&format!(".{:06}", millis * 1000));
    }
    text
}

/// 讀取活頁簿所有工作表；無法讀取的工作表略過
pub fn read_workbook(path: &Path) -> Result<Vec<SheetRows>> {
    let mut workbook = open_workbook_auto(path)?;
    let names: Vec<String> = workbook.sheet_names().to_vec();

    let mut sheets = Vec::with_capacity(names.len());
    for name in &names {
        match workbook.worksheet_range(name) {
            Ok(range) => sheets.push(SheetRows::from_range(name, &range)),
            Err(e) => warn!("略過工作表 {}：{}", name, e),
        }
    }
    Ok(sheets)
}

/// 依序畫出標題、工作表名稱與每列文字，游標低於下邊界時換頁
pub fn layout_workbook<S: DrawingSurface>(surface: &mut S, file_name: &str, sheets: &[SheetRows]) {
    let (_, height) = surface.page_size();
    let top = height - CANVAS_TOP_OFFSET;
    let mut y = top;

    surface.draw_string(CANVAS_LEFT, y, &format!("Excel File: {}", file_name));
    y -= 30.0;

    for sheet in sheets {
        surface.draw_string(CANVAS_LEFT, y, &format!("Sheet: {}", sheet.name));
        y -= 20.0;

        for row in &sheet.rows {
            if y < BOTTOM_MARGIN {
                surface.show_page();
                y = top;
            }
            let text = row.join(CELL_SEPARATOR);
            if text.trim().is_empty() {
                continue;
            }
            surface.draw_string(CANVAS_LEFT, y, &truncate_chars(&text, MAX_LINE_CHARS));
            y -= 15.0;
        }
        y -= 20.0;
    }
}

pub fn convert(input: &Path, output: &Path) -> Result<()> {
    let sheets = read_workbook(input)?;
    debug!("試算表 {}：{} 個工作表", input.display(), sheets.len());

    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut canvas = PdfCanvas::a4(&file_name)?;
    layout_workbook(&mut canvas, &file_name, &sheets);
    canvas.save(output)
}
