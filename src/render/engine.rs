use super::{canvas::Canvas, operation::RenderOperation, properties::Rect, text::Line};
use crate::{
    media::AsciiRasterizer,
    render::layout::Alignment,
    style::Color,
};
use unicode_width::UnicodeWidthStr;

/// Draws render operations onto a canvas.
pub(crate) struct RenderEngine<'a> {
    canvas: &'a mut Canvas,
}

impl<'a> RenderEngine<'a> {
    pub(crate) fn new(canvas: &'a mut Canvas) -> Self {
        Self { canvas }
    }

    pub(crate) fn render<'b>(mut self, operations: impl Iterator<Item = &'b RenderOperation>) {
        for operation in operations {
            self.render_one(operation);
        }
    }

    fn render_one(&mut self, operation: &RenderOperation) {
        match operation {
            RenderOperation::ClearScreen(color) => self.canvas.clear(Some(*color)),
            RenderOperation::Fill { rect, color } => self.canvas.fill(*rect, *color),
            RenderOperation::FillGradient { rect, from, to } => self.fill_gradient(*rect, *from, *to),
            RenderOperation::Tint { rect, color, ratio } => self.canvas.tint(*rect, *color, *ratio),
            RenderOperation::RenderText { line, area, alignment } => self.render_text(line, area, *alignment),
            RenderOperation::RenderImage { image, rect, fit } => AsciiRasterizer::draw(image, *rect, *fit, self.canvas),
            RenderOperation::SetCell { column, row, character, style } => {
                self.canvas.set(*column, *row, *character, *style)
            }
        };
    }

    fn fill_gradient(&mut self, rect: Rect, from: Color, to: Color) {
        let max_column = rect.columns.saturating_sub(1).max(1) as f64;
        let max_row = rect.rows.saturating_sub(1).max(1) as f64;
        self.canvas.fill_with(rect, |column, row| {
            let ratio = (column as f64 / max_column + row as f64 / max_row) / 2.0;
            from.blend(to, ratio)
        });
    }

    fn render_text(&mut self, line: &Line, area: &Rect, alignment: Alignment) {
        if area.is_empty() {
            return;
        }
        let width = line.width().min(u16::MAX as usize) as u16;
        let positioning = alignment.compute(area, width);
        let max_column = positioning.start_column.saturating_add(positioning.max_line_length);
        let mut column = positioning.start_column;
        for text in &line.0 {
            if text.content.width() == 0 {
                continue;
            }
            column += self.canvas.print(column, area.row, text, max_column);
            if column >= max_column {
                break;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        render::{properties::WindowSize, text::Text},
        style::TextStyle,
    };

    fn render(dimensions: WindowSize, operations: &[RenderOperation]) -> Canvas {
        let mut canvas = Canvas::new(dimensions);
        RenderEngine::new(&mut canvas).render(operations.iter());
        canvas
    }

    #[test]
    fn aligned_text() {
        let text = |content: &str, row, alignment| RenderOperation::RenderText {
            line: content.into(),
            area: Rect::new(1, row, 6, 1),
            alignment,
        };
        let operations =
            [text("ab", 0, Alignment::Left), text("cd", 1, Alignment::Right), text("ef", 2, Alignment::Center)];
        let canvas = render(WindowSize { rows: 3, columns: 8 }, &operations);
        assert_eq!(canvas.lines(), &[" ab     ", "     cd ", "   ef   "]);
    }

    #[test]
    fn text_is_cut() {
        let line = Line(vec![Text::from("abc"), Text::new("def", TextStyle::default().bold())]);
        let operations =
            [RenderOperation::RenderText { line, area: Rect::new(0, 0, 4, 1), alignment: Alignment::Right }];
        let canvas = render(WindowSize { rows: 1, columns: 6 }, &operations);
        assert_eq!(canvas.lines(), &["abcd  "]);
        assert!(canvas.cell(3, 0).unwrap().style.is_bold());
    }

    #[test]
    fn gradient_corners() {
        let from = Color::new(0, 0, 0);
        let to = Color::new(200, 100, 50);
        let operations = [RenderOperation::FillGradient { rect: Rect::new(0, 0, 5, 3), from, to }];
        let canvas = render(WindowSize { rows: 3, columns: 5 }, &operations);
        assert_eq!(canvas.cell(0, 0).unwrap().style.colors.background, Some(from));
        assert_eq!(canvas.cell(4, 2).unwrap().style.colors.background, Some(to));
        assert_eq!(canvas.cell(4, 0).unwrap().style.colors.background, Some(Color::new(100, 50, 25)));
    }

    #[test]
    fn later_operations_on_top() {
        let operations = [
            RenderOperation::ClearScreen(Color::new(0, 0, 0)),
            RenderOperation::Fill { rect: Rect::new(1, 0, 1, 1), color: Color::new(255, 0, 0) },
            RenderOperation::SetCell { column: 1, row: 0, character: 'x', style: TextStyle::default() },
        ];
        let canvas = render(WindowSize { rows: 1, columns: 3 }, &operations);
        assert_eq!(canvas.lines(), &[" x "]);
        assert_eq!(canvas.cell(1, 0).unwrap().style.colors.background, Some(Color::new(255, 0, 0)));
        assert_eq!(canvas.cell(0, 0).unwrap().style.colors.background, Some(Color::new(0, 0, 0)));
    }
}
