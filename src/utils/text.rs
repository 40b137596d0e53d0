use html_escape::{decode_html_entities, encode_text};

// Helvetica 字寬（1/1000 em），ASCII 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];
const DEFAULT_WIDTH: u16 = 556;

/// 估算字串以 Helvetica 顯示時的寬度（pt）
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (32..=126).contains(&code) {
                HELVETICA_WIDTHS[(code - 32) as usize] as u32
            } else {
                DEFAULT_WIDTH as u32
            }
        })
        .sum();
    units as f32 * font_size / 1000.0
}

/// 依字元數截斷（非位元組）
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// 內建字型只涵蓋 Latin-1，其餘字元以 '?' 取代，控制字元移除
pub fn to_builtin_charset(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\t')
        .map(|c| match c {
            '\t' => ' ',
            c if (c as u32) <= 0xFF => c,
            _ => '?',
        })
        .collect()
}

/// 逸出段落標記中的 `&`、`<`、`>`
pub fn escape_markup(text: &str) -> String {
    encode_text(text).into_owned()
}

/// 將段落標記轉為純文字：移除標籤、解碼實體、合併空白
pub fn markup_to_text(markup: &str) -> String {
    let mut stripped = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(start) = rest.find('<') {
        stripped.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match tag_length(candidate) {
            Some(len) => {
                // 標籤視為斷字
                stripped.push(' ');
                rest = &candidate[len..];
            }
            None => {
                stripped.push('<');
                rest = &candidate[1..];
            }
        }
    }
    stripped.push_str(rest);

    let decoded = decode_html_entities(&stripped);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

// `<tag ...>`、`</tag>`、`<!-- -->` 的長度；不是標籤時回傳 None
fn tag_length(text: &str) -> Option<usize> {
    let mut chars = text.chars().skip(1);
    let first = chars.next()?;
    if first == '/' || first == '!' || first.is_ascii_alphabetic() {
        text.find('>').map(|end| end + 1)
    } else {
        None
    }
}

/// 依寬度貪婪斷行；超過寬度的單字按字元切開
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if text_width(&candidate, font_size) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if text_width(word, font_size) <= max_width {
            current = word.to_string();
        } else {
            let mut pieces = split_long_word(word, font_size, max_width);
            current = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_long_word(word: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in word.chars() {
        piece.push(c);
        if text_width(&piece, font_size) > max_width && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(c);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
