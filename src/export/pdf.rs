use crate::chart::RenderedChart;
use crate::errors::AppResult;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Image already written into the document, ready to be placed on pages.
#[derive(Debug, Clone)]
pub struct PdfImage {
    name: String,
    width: u32,
    height: u32,
}

impl PdfImage {
    /// Drawn height for `width` points, keeping the aspect ratio.
    pub fn scaled_height(&self, width: f32) -> f32 {
        width * self.height as f32 / self.width.max(1) as f32
    }
}

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    /// (page, content stream) of the page being drawn.
    current_page: Option<(Ref, Ref)>,
    images: Vec<(String, Ref)>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,
    bold_font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);
        let next_id = 5;

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_font_id)
            .base_font(Name(b"Helvetica-Bold"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_page: None,
            images: Vec::new(),

            // A4 portrait
            page_w: 595.0,
            page_h: 842.0,
            margin: 40.0,
            row_h: 14.0,

            next_id,
            font_id,
            bold_font_id,

            font_size: 7.0,
            header_font_size: 7.5,
            title_font_size: 12.0,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Write `chart` as a Flate-compressed RGB image XObject.
    pub fn add_image(&mut self, chart: &RenderedChart) -> AppResult<PdfImage> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(chart.rgb_bytes())?;
        let data = encoder.finish()?;

        let id = self.fresh_ref();
        let name = format!("Im{}", self.images.len() + 1);

        let mut image = self.pdf.image_xobject(id, &data);
        image.filter(Filter::FlateDecode);
        image.width(chart.width() as i32);
        image.height(chart.height() as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        drop(image);

        self.images.push((name.clone(), id));

        Ok(PdfImage {
            name,
            width: chart.width(),
            height: chart.height(),
        })
    }

    /// Start a page; its dictionary is written by `finalize_page`.
    pub fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);
        self.current_page = Some((page_id, content_id));

        Content::new()
    }

    pub fn finalize_page(&mut self, content: Content) {
        let Some((page_id, content_id)) = self.current_page.take() else {
            return;
        };

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        let mut resources = page.resources();
        {
            let mut fonts = resources.fonts();
            fonts.pair(Name(b"F1"), self.font_id);
            fonts.pair(Name(b"F2"), self.bold_font_id);
        }
        if !self.images.is_empty() {
            let mut xobjects = resources.x_objects();
            for (name, id) in &self.images {
                xobjects.pair(Name(name.as_bytes()), *id);
            }
        }
        drop(resources);
        drop(page);

        self.pdf.stream(content_id, &content.finish());
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    pub fn draw_text(
        &self,
        content: &mut Content,
        x: f32,
        y: f32,
        size: f32,
        text: &str,
        bold: bool,
    ) {
        // Standard Type1 fonts only cover latin text.
        let bytes: Vec<u8> = text
            .chars()
            .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
            .collect();

        content.begin_text();
        content.set_font(Name(if bold { b"F2" } else { b"F1" }), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    /// Draw `lines` top-down from `y`, returning the baseline after the last one.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_lines(
        &self,
        content: &mut Content,
        x: f32,
        mut y: f32,
        size: f32,
        leading: f32,
        lines: &[String],
        bold: bool,
    ) -> f32 {
        for line in lines {
            self.draw_text(content, x, y, size, line, bold);
            y -= leading;
        }
        y
    }

    /// Place `image` with its lower-left corner at (x, y), `width` points wide.
    pub fn draw_image(&self, content: &mut Content, image: &PdfImage, x: f32, y: f32, width: f32) {
        let height = image.scaled_height(width);
        content.save_state();
        content.transform([width, 0.0, 0.0, height, x, y]);
        content.x_object(Name(image.name.as_bytes()));
        content.restore_state();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        col_widths: &[f32],
        row: &[String],
        font_size: f32,
    ) {
        let mut x = self.margin;

        for (text, w) in row.iter().zip(col_widths) {
            self.draw_text(content, x + 3.0, y + 4.0, font_size, text, false);
            self.draw_cell_borders(content, x, y, *w, self.row_h);
            x += w;
        }
    }

    fn fill_band(&self, content: &mut Content, y: f32, width: f32, gray: f32) {
        content.save_state();
        content.set_fill_rgb(gray, gray, gray + 0.03);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    /// Column widths from header + cell lengths, shrunk to fit the page.
    fn compute_col_widths(&self, headers: &[String], rows: &[Vec<String>]) -> Vec<f32> {
        let per_char = self.font_size * 0.55;
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| h.len() as f32 * per_char + 8.0)
            .collect();

        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = w.max(cell.len() as f32 * per_char + 8.0);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_page_header_footer(&self, content: &mut Content, title: &str, page: usize) {
        self.draw_text(
            content,
            self.margin,
            self.page_h - self.margin,
            self.title_font_size,
            title,
            true,
        );

        let pg = format!("Page {}", page);
        self.draw_text(
            content,
            self.page_w - self.margin - 30.0,
            self.margin - 20.0,
            self.font_size,
            &pg,
            false,
        );
    }

    /// Multi-page zebra table; an empty table still gets its header page.
    pub fn write_table(&mut self, title: &str, headers: &[String], rows: &[Vec<String>]) {
        let col_widths = self.compute_col_widths(headers, rows);
        let table_w: f32 = col_widths.iter().sum();

        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;

        loop {
            let mut content = self.new_page();
            self.draw_page_header_footer(&mut content, title, page_idx);

            let mut y = self.page_h - self.margin - 30.0;

            self.fill_band(&mut content, y, table_w, 0.85);
            self.draw_row(&mut content, y, &col_widths, headers, self.header_font_size);
            y -= self.row_h;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y - self.row_h < self.margin {
                    break;
                }
                if i % 2 == 0 {
                    self.fill_band(&mut content, y, table_w, 0.96);
                }
                self.draw_row(&mut content, y, &col_widths, row, self.font_size);
                y -= self.row_h;
                consumed += 1;
            }

            self.finalize_page(content);
            remaining = &remaining[consumed..];
            page_idx += 1;

            if remaining.is_empty() || consumed == 0 {
                break;
            }
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}
