use anyhow::{anyhow, Result};
use printpdf::{BuiltinFont, Color, Line, Mm, PdfDocument, Point, Rgb};
use time::Date;

use crate::core::time::format_long_date;

const PAGE_WIDTH_MM: f32 = 297.0;
const PAGE_HEIGHT_MM: f32 = 210.0;
const MARGIN_MM: f32 = 25.0;
/// Average Helvetica glyph advance as a fraction of the font size.
const GLYPH_WIDTH_EM: f32 = 0.5;
const PT_TO_MM: f32 = 0.352_778;

pub(crate) const TITLE: &str = "Certificate of Completion";
pub(crate) const FOOTER: &str = "This certificate is awarded in recognition of the successful \
                                 completion of all course requirements.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FontStyle {
    Regular,
    Bold,
    Oblique,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Shade {
    r: f32,
    g: f32,
    b: f32,
}

const INK: Shade = Shade { r: 0.173, g: 0.243, b: 0.314 };
const SLATE: Shade = Shade { r: 0.204, g: 0.286, b: 0.369 };
const MUTED: Shade = Shade { r: 0.498, g: 0.549, b: 0.553 };

/// One centred line of text on the certificate.
#[derive(Debug, Clone)]
pub(crate) struct TextLine {
    pub(crate) text: String,
    pub(crate) size_pt: f32,
    pub(crate) style: FontStyle,
    pub(crate) shade: Shade,
    pub(crate) baseline_mm: f32,
}

#[derive(Debug, Clone)]
pub(crate) struct CertificateLayout {
    pub(crate) lines: Vec<TextLine>,
    pub(crate) rules_mm: [f32; 2],
}

pub(crate) struct CertificateContent<'a> {
    pub(crate) student_name: &'a str,
    pub(crate) course_title: &'a str,
    pub(crate) completed_on: Date,
}

pub(crate) fn file_name(course_id: &str, student_id: &str) -> String {
    format!("certificate-{course_id}-{student_id}.pdf")
}

pub(crate) fn layout(content: &CertificateContent<'_>) -> CertificateLayout {
    let line = |text: String, size_pt: f32, style: FontStyle, shade: Shade, baseline_mm: f32| {
        TextLine { text, size_pt, style, shade, baseline_mm }
    };

    CertificateLayout {
        lines: vec![
            line(TITLE.to_string(), 36.0, FontStyle::Bold, INK, 160.0),
            line("This is to certify that".to_string(), 14.0, FontStyle::Regular, SLATE, 138.0),
            line(content.student_name.to_string(), 24.0, FontStyle::Bold, INK, 122.0),
            line(
                "has successfully completed the course".to_string(),
                12.0,
                FontStyle::Regular,
                SLATE,
                106.0,
            ),
            line(content.course_title.to_string(), 16.0, FontStyle::Oblique, INK, 94.0),
            line(
                format!("Completed on: {}", format_long_date(content.completed_on)),
                11.0,
                FontStyle::Regular,
                SLATE,
                76.0,
            ),
            line(FOOTER.to_string(), 9.0, FontStyle::Regular, MUTED, 50.0),
        ],
        rules_mm: [178.0, 62.0],
    }
}

/// Left edge that centres `text` on the page, estimated from the average
/// glyph width since builtin fonts carry no metrics.
fn centered_x(text: &str, size_pt: f32) -> f32 {
    let width = text.chars().count() as f32 * size_pt * GLYPH_WIDTH_EM * PT_TO_MM;
    ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM)
}

pub(crate) fn render_pdf(content: &CertificateContent<'_>) -> Result<Vec<u8>> {
    let layout = layout(content);
    let (doc, page, layer) =
        PdfDocument::new(TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Certificate");
    let canvas = doc.get_page(page).get_layer(layer);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| anyhow!("failed to load Helvetica: {err}"))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| anyhow!("failed to load Helvetica-Bold: {err}"))?;
    let oblique = doc
        .add_builtin_font(BuiltinFont::HelveticaOblique)
        .map_err(|err| anyhow!("failed to load Helvetica-Oblique: {err}"))?;

    canvas.set_outline_color(Color::Rgb(Rgb::new(INK.r, INK.g, INK.b, None)));
    canvas.set_outline_thickness(3.0);
    for y in layout.rules_mm {
        canvas.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_MM), Mm(y)), false),
                (Point::new(Mm(PAGE_WIDTH_MM - MARGIN_MM), Mm(y)), false),
            ],
            is_closed: false,
        });
    }

    for line in &layout.lines {
        let font = match line.style {
            FontStyle::Regular => &regular,
            FontStyle::Bold => &bold,
            FontStyle::Oblique => &oblique,
        };
        canvas.set_fill_color(Color::Rgb(Rgb::new(line.shade.r, line.shade.g, line.shade.b, None)));
        canvas.use_text(
            line.text.as_str(),
            line.size_pt,
            Mm(centered_x(&line.text, line.size_pt)),
            Mm(line.baseline_mm),
            font,
        );
    }

    doc.save_to_bytes().map_err(|err| anyhow!("failed to serialize certificate: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    fn content() -> CertificateContent<'static> {
        CertificateContent {
            student_name: "Ada Lovelace",
            course_title: "Analytical Engines 101",
            completed_on: Date::from_calendar_date(2026, Month::October, 17).unwrap(),
        }
    }

    #[test]
    fn layout_carries_name_title_and_date() {
        let layout = layout(&content());
        let texts: Vec<&str> = layout.lines.iter().map(|line| line.text.as_str()).collect();

        assert_eq!(texts.first(), Some(&TITLE));
        assert!(texts.contains(&"Ada Lovelace"));
        assert!(texts.contains(&"Analytical Engines 101"));
        assert!(texts.contains(&"Completed on: October 17, 2026"));
        assert_eq!(texts.last(), Some(&FOOTER));
    }

    #[test]
    fn lines_run_top_to_bottom() {
        let layout = layout(&content());
        assert!(layout.lines.windows(2).all(|pair| pair[0].baseline_mm > pair[1].baseline_mm));
    }

    #[test]
    fn long_text_is_clamped_to_margin() {
        let long = "x".repeat(400);
        assert_eq!(centered_x(&long, 12.0), MARGIN_MM);
        assert!(centered_x("short", 12.0) > MARGIN_MM);
    }

    #[test]
    fn renders_a_pdf_document() {
        let bytes = render_pdf(&content()).expect("pdf");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn file_name_embeds_both_ids() {
        assert_eq!(file_name("c1", "s1"), "certificate-c1-s1.pdf");
    }
}
