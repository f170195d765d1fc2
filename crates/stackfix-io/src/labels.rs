//! User-visible strings for each supported [`Locale`].

use stackfix_core::Locale;

/// Interface strings for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub add_images: &'static str,
    pub clear: &'static str,
    pub download_all: &'static str,
    pub exporting: &'static str,
    pub background_color: &'static str,
    pub stack_count: &'static str,
    pub theme_mode: &'static str,
    pub preview: &'static str,
    pub download: &'static str,
    pub delete: &'static str,
    pub close: &'static str,
    pub dismiss: &'static str,
    pub empty_hint: &'static str,
    pub preview_unavailable: &'static str,
}

const SIMPLIFIED_CHINESE: Labels = Labels {
    add_images: "添加图片",
    clear: "清空图片",
    download_all: "全部下载",
    exporting: "导出中…",
    background_color: "背景颜色",
    stack_count: "叠加次数",
    theme_mode: "主题模式",
    preview: "预览",
    download: "下载",
    delete: "删除",
    close: "关闭",
    dismiss: "知道了",
    empty_hint: "添加 PNG 截图以开始",
    preview_unavailable: "无法预览",
};

const JAPANESE: Labels = Labels {
    add_images: "画像を追加",
    clear: "画像をクリア",
    download_all: "すべてダウンロード",
    exporting: "書き出し中…",
    background_color: "背景色",
    stack_count: "重ね回数",
    theme_mode: "テーマ",
    preview: "プレビュー",
    download: "ダウンロード",
    delete: "削除",
    close: "閉じる",
    dismiss: "閉じる",
    empty_hint: "PNG スクリーンショットを追加してください",
    preview_unavailable: "プレビューできません",
};

impl Labels {
    /// Strings for `locale`.
    #[must_use]
    pub const fn for_locale(locale: Locale) -> &'static Self {
        match locale {
            Locale::SimplifiedChinese => &SIMPLIFIED_CHINESE,
            Locale::Japanese => &JAPANESE,
        }
    }
}
