use super::{chart, frame::SlideArea, reading_line, text_width, Frame, TextFlow, ViewContext};
use crate::{
    deck::{Decoration, Direction, ImageRef, SlideBody, SlideRecord},
    markup::{is_heading, split_columns, strip_markers},
    media::ImageFit,
    palette::colors,
    render::{
        layout::{reading_order, Alignment},
        operation::RenderOperation,
        properties::Rect,
        text::{Line, Text},
    },
    style::{Color, TextStyle},
};
use std::iter;

const COLUMN_GAP: u16 = 4;
const PANEL_OPACITY: f64 = 0.5;
const CARD_OPACITY: f64 = 0.6;

mod icons {
    pub(super) const WAVE: &str = "∿";
    pub(super) const GLOBE: &str = "◉";
    pub(super) const WARNING: &str = "⚠";
    pub(super) const LAYERS: &str = "≡";
    pub(super) const RADIO: &str = "◎";
    pub(super) const ZAP: &str = "ϟ";
    pub(super) const IMAGES: &str = "▣";
    pub(super) const BULLET: &str = "•";
    pub(super) const DISC: &str = "●";
}

/// Lay out a slide's content within its frame.
pub(crate) fn render_body(slide: &SlideRecord, area: &SlideArea, context: &ViewContext, frame: &mut Frame) {
    let title = slide.title.as_str();
    let operations = &mut frame.operations;
    match &slide.body {
        SlideBody::Title { subtitle, .. } => title_slide(title, subtitle.as_deref(), area, context, operations),
        SlideBody::ContentList { items } => content_list(title, items, area, context, operations),
        SlideBody::ContentColumns { paragraphs } => content_columns(title, paragraphs, area, context, operations),
        SlideBody::Table { headers, rows } => table(title, headers, rows, area, context, operations),
        SlideBody::Chart { bullets, samples } => {
            let mut flow = TextFlow::new(area.content, context.direction, operations);
            push_header(&mut flow, Text::new(icons::WAVE, area.text_style()), title, area, context.direction);
            flow.skip(1);
            let body = flow.remaining();
            let [text_column, chart_column]: [Rect; 2] =
                reading_order(body.split_columns(2, COLUMN_GAP), context.direction).try_into().unwrap_or_default();

            let mut flow = TextFlow::new(text_column, context.direction, operations);
            for bullet in bullets {
                let style = area.text_style();
                flow.push_marked(Text::new(icons::BULLET, style), Text::new(bullet.as_str(), style).into());
                flow.skip(1);
            }
            chart::draw_chart(samples, chart_column, context, frame);
        }
        SlideBody::Quote { paragraphs } => quote(title, paragraphs, area, context, operations),
        SlideBody::Diagram { lines, decorations } => diagram(title, lines, decorations, area, context, operations),
        SlideBody::ImageGrid { images } => image_grid(title, images, area, context, operations),
        SlideBody::Unknown { kind } => unknown(kind, area, operations),
    }
}

fn push_header(flow: &mut TextFlow, icon: Text, title: &str, area: &SlideArea, direction: Direction) {
    let style = area.text_style();
    let line = reading_line(vec![icon, Text::new(" ", style), Text::new(title, style.bold())], direction);
    flow.push_wrapped(line);
}

fn title_slide(
    title: &str,
    subtitle: Option<&str>,
    area: &SlideArea,
    context: &ViewContext,
    operations: &mut Vec<RenderOperation>,
) {
    let style = area.text_style();
    let width = area.content.columns as usize;
    let mut lines = vec![Line::from(Text::new(icons::WAVE, style)), Line::default()];
    lines.extend(Line::from(Text::new(title, style.bold())).wrap(width));
    if let Some(subtitle) = subtitle.filter(|s| !s.trim().is_empty()) {
        lines.push(Line::default());
        lines.extend(Line::from(Text::new(subtitle, style)).wrap(width));
    }
    let top = area.content.rows.saturating_sub(lines.len() as u16) / 2;
    let mut flow = TextFlow::new(area.content, context.direction, operations).aligned(Alignment::Center);
    flow.skip(top);
    for line in lines {
        flow.push_line(line);
    }
}

fn content_list(
    title: &str,
    items: &[String],
    area: &SlideArea,
    context: &ViewContext,
    operations: &mut Vec<RenderOperation>,
) {
    let mut flow = TextFlow::new(area.content, context.direction, operations);
    push_header(&mut flow, Text::new(icons::GLOBE, area.text_style()), title, area, context.direction);
    let rule_style = TextStyle::default().fg_color(area.background.blend(area.foreground, 0.4));
    flow.push_line(Text::new("─".repeat(area.content.columns as usize), rule_style).into());
    flow.skip(1);
    for (index, item) in items.iter().enumerate() {
        let opacity = context.clock.bullet_opacity(index);
        let style = TextStyle::default().fg_color(area.background.blend(area.foreground, opacity));
        flow.push_marked(Text::new(icons::BULLET, style), Text::new(item.as_str(), style).into());
        flow.skip(1);
    }
}

fn content_columns(
    title: &str,
    paragraphs: &[String],
    area: &SlideArea,
    context: &ViewContext,
    operations: &mut Vec<RenderOperation>,
) {
    let mut flow = TextFlow::new(area.content, context.direction, operations);
    push_header(&mut flow, Text::new(icons::LAYERS, area.text_style()), title, area, context.direction);
    flow.skip(1);
    let body = flow.remaining();

    let (first, second) = split_columns(paragraphs);
    let columns = reading_order(vec![first, second], context.direction);
    for (rect, paragraphs) in body.split_columns(2, COLUMN_GAP).into_iter().zip(columns) {
        let mut flow = TextFlow::new(rect, context.direction, operations);
        for paragraph in paragraphs {
            let style = match is_heading(paragraph) {
                true => TextStyle::default().fg_color(colors::SUB_HEADING).bold(),
                false => area.text_style(),
            };
            flow.push_wrapped(Text::new(strip_markers(paragraph), style).into());
            flow.skip(1);
        }
    }
}

fn table(
    title: &str,
    headers: &[String],
    rows: &[Vec<String>],
    area: &SlideArea,
    context: &ViewContext,
    operations: &mut Vec<RenderOperation>,
) {
    let mut flow = TextFlow::new(area.content, context.direction, operations).aligned(Alignment::Center);
    flow.push_wrapped(Text::new(title, area.text_style().bold()).into());
    flow.skip(1);
    let body = flow.remaining();

    let widths = column_widths(headers, rows, body.columns);
    let total: u16 = widths.iter().sum();
    if widths.is_empty() || body.rows < 2 {
        return;
    }
    let table = Rect { column: body.column + body.columns.saturating_sub(total) / 2, columns: total, ..body };
    let visible_rows = (rows.len() as u16).min(body.rows - 2);
    operations.push(RenderOperation::Fill { rect: table.top(visible_rows + 2), color: colors::PANEL });

    let header_style = TextStyle::default().fg_color(colors::WHITE).bold();
    operations.push(RenderOperation::Fill { rect: table.top(1), color: colors::TABLE_HEADER });
    let header_cells = headers.iter().map(|header| (header.as_str(), header_style));
    push_row(table.row, header_cells, &table, &widths, context.direction, operations);

    let separator_style = TextStyle::default().fg_color(colors::CONTROLS_BORDER);
    operations.push(RenderOperation::RenderText {
        line: Text::new("─".repeat(total as usize), separator_style).into(),
        area: Rect { row: table.row + 1, rows: 1, ..table },
        alignment: Alignment::Left,
    });

    let first_style = TextStyle::default().fg_color(colors::TABLE_FIRST_CELL).bold();
    let cell_style = TextStyle::default().fg_color(colors::TABLE_CELL);
    for (index, row) in rows.iter().take(visible_rows as usize).enumerate() {
        let row_index = table.row + 2 + index as u16;
        if index % 2 == 1 {
            let rect = Rect { row: row_index, rows: 1, ..table };
            operations.push(RenderOperation::Fill { rect, color: colors::TABLE_STRIPE });
        }
        let cells = row.iter().enumerate().map(|(column, cell)| match column {
            0 => (cell.as_str(), first_style),
            _ => (cell.as_str(), cell_style),
        });
        push_row(row_index, cells, &table, &widths, context.direction, operations);
    }
}

/// Compute the width of each table column, padding included.
///
/// Columns are shrunk proportionally when the table doesn't fit in `max_width`.
fn column_widths(headers: &[String], rows: &[Vec<String>], max_width: u16) -> Vec<u16> {
    let count = rows.iter().map(Vec::len).chain([headers.len()]).max().unwrap_or(0);
    let widths: Vec<u16> = (0..count)
        .map(|index| {
            let cells = iter::once(headers.get(index)).chain(rows.iter().map(|row| row.get(index)));
            let widest = cells.flatten().map(|cell| text_width(cell)).max().unwrap_or(0);
            widest.saturating_add(2)
        })
        .collect();
    let total: u32 = widths.iter().map(|width| *width as u32).sum();
    if total <= max_width as u32 {
        return widths;
    }
    widths.into_iter().map(|width| (width as u32 * max_width as u32 / total).max(1) as u16).collect()
}

fn push_row<'a>(
    row: u16,
    cells: impl Iterator<Item = (&'a str, TextStyle)>,
    table: &Rect,
    widths: &[u16],
    direction: Direction,
    operations: &mut Vec<RenderOperation>,
) {
    let mut offset = 0;
    // Cells missing at the end of a row are left empty.
    for ((content, style), width) in cells.zip(widths) {
        let column = match direction {
            Direction::Ltr => table.column + offset,
            Direction::Rtl => table.right().saturating_sub(offset + width),
        };
        offset += width;
        let area = Rect::new(column + 1, row, width.saturating_sub(2), 1);
        let line = Text::new(content, style).into();
        operations.push(RenderOperation::RenderText { line, area, alignment: Alignment::reading(direction) });
    }
}

fn quote(
    title: &str,
    paragraphs: &[String],
    area: &SlideArea,
    context: &ViewContext,
    operations: &mut Vec<RenderOperation>,
) {
    let mut flow = TextFlow::new(area.content, context.direction, operations);
    let icon = Text::new(icons::WARNING, area.text_style().fg_color(colors::QUOTE_ICON));
    push_header(&mut flow, icon, title, area, context.direction);
    flow.skip(1);
    let mut body = flow.remaining();

    let style = TextStyle::default().fg_color(colors::QUOTE_TEXT).italics();
    for paragraph in paragraphs {
        let text = Text::new(format!("\"{paragraph}\""), style);
        let lines = Line::from(text).wrap(body.columns.saturating_sub(4) as usize);
        let height = lines.len() as u16 + 2;
        if body.rows < 3 {
            break;
        }
        let block = body.top(height);
        let border_column = match context.direction {
            Direction::Ltr => block.column,
            Direction::Rtl => block.right().saturating_sub(1),
        };
        operations.push(RenderOperation::Fill { rect: block, color: colors::QUOTE_BACKGROUND });
        operations.push(RenderOperation::Fill {
            rect: Rect { column: border_column, columns: 1, ..block },
            color: colors::QUOTE_ICON,
        });
        let mut flow = TextFlow::new(block.shrink(2, 1), context.direction, operations);
        for line in lines {
            flow.push_line(line);
        }
        body = body.skip_rows(height + 1);
    }
}

fn diagram(
    title: &str,
    lines: &[String],
    decorations: &[Decoration],
    area: &SlideArea,
    context: &ViewContext,
    operations: &mut Vec<RenderOperation>,
) {
    let direction = context.direction;
    let mut flow = TextFlow::new(area.content, direction, operations);
    push_header(&mut flow, Text::new(icons::RADIO, area.text_style()), title, area, direction);
    flow.skip(1);
    let body = flow.remaining();

    let shadow_zones = decorations.contains(&Decoration::ShadowZones);
    let available = match shadow_zones {
        true => body.rows.saturating_sub(2),
        false => body.rows,
    };
    // Headings and details are both indented by a two cell marker.
    let inner_width = body.columns.saturating_sub(4).saturating_sub(2) as usize;
    let needed: usize = lines.iter().map(|line| Line::from(strip_markers(line)).wrap(inner_width).len()).sum();
    let panel = body.top((needed as u16).saturating_add(2).min(available));
    operations.push(RenderOperation::Tint { rect: panel, color: colors::WHITE, ratio: PANEL_OPACITY });

    let mut flow = TextFlow::new(panel.shrink(2, 1), direction, operations);
    let heading_style = area.text_style().bold();
    let detail_style = TextStyle::default().fg_color(colors::TABLE_CELL);
    for line in lines {
        let text = strip_markers(line);
        match is_heading(line) {
            true => {
                let icon = Text::new(icons::ZAP, TextStyle::default().fg_color(colors::DIAGRAM_ICON).bold());
                flow.push_marked(icon, Text::new(text, heading_style).into());
            }
            false => flow.push_marked(Text::from(" "), Text::new(text, detail_style).into()),
        };
    }

    if shadow_zones && panel.bottom_edge() < body.bottom_edge() {
        let groups = [(colors::SHADOW_ZONE, "P-Wave Shadow"), (colors::LIQUID_CORE, "Liquid Core blocks S")];
        let mut chunks = Vec::new();
        for (index, (color, label)) in reading_order(groups.to_vec(), direction).into_iter().enumerate() {
            if index > 0 {
                chunks.push(Text::from("    "));
            }
            chunks.extend(shadow_zone(color, label, area.text_style(), direction));
        }
        let area = Rect { row: panel.bottom_edge() + 1, rows: 1, ..body };
        operations.push(RenderOperation::RenderText { line: Line(chunks), area, alignment: Alignment::Center });
    }
}

fn shadow_zone(color: Color, label: &str, style: TextStyle, direction: Direction) -> Vec<Text> {
    let disc = Text::new(icons::DISC, TextStyle::default().fg_color(color));
    reading_order(vec![disc, Text::new(" ", style), Text::new(label, style)], direction)
}

fn image_grid(
    title: &str,
    images: &[ImageRef],
    area: &SlideArea,
    context: &ViewContext,
    operations: &mut Vec<RenderOperation>,
) {
    let mut flow = TextFlow::new(area.content, context.direction, operations);
    push_header(&mut flow, Text::new(icons::IMAGES, area.text_style()), title, area, context.direction);
    flow.skip(1);
    let body = flow.remaining();
    if images.is_empty() {
        return;
    }

    let grid_rows = images.len().div_ceil(2) as u16;
    let card_height = (body.rows.saturating_sub(grid_rows - 1) / grid_rows).max(3);
    for (row_index, row_images) in images.chunks(2).enumerate() {
        let row = body.row + row_index as u16 * (card_height + 1);
        let rect = Rect { row, rows: card_height, ..body };
        if rect.bottom_edge() > body.bottom_edge() {
            break;
        }
        let cards = reading_order(rect.split_columns(2, COLUMN_GAP), context.direction);
        for (image, card) in row_images.iter().zip(cards) {
            image_card(image, card, context, operations);
        }
    }
}

fn image_card(image: &ImageRef, card: Rect, context: &ViewContext, operations: &mut Vec<RenderOperation>) {
    operations.push(RenderOperation::Tint { rect: card, color: colors::WHITE, ratio: CARD_OPACITY });
    let caption = image.caption.as_deref().filter(|caption| !caption.trim().is_empty());
    let inner = card.shrink(1, 0);
    let picture = match caption {
        Some(_) => Rect { rows: inner.rows.saturating_sub(1), ..inner },
        None => inner,
    };
    match context.images.get(&image.url) {
        Some(loaded) => {
            let image = loaded.clone();
            operations.push(RenderOperation::RenderImage { image, rect: picture, fit: ImageFit::Contain });
        }
        None => {
            operations.push(RenderOperation::Fill { rect: picture, color: colors::TOOLTIP });
            let style = TextStyle::default().fg_color(colors::MUTED);
            let line = Line(vec![Text::new(icons::IMAGES, style), Text::new(format!(" {}", image.url), style)]);
            let area = Rect { row: picture.row + picture.rows / 2, rows: 1, ..picture };
            operations.push(RenderOperation::RenderText { line, area, alignment: Alignment::Center });
        }
    };
    if let Some(caption) = caption {
        let line = Text::new(caption, TextStyle::default().fg_color(colors::TABLE_CELL).bold()).into();
        let area = Rect { row: inner.bottom_edge().saturating_sub(1), rows: 1, ..inner };
        operations.push(RenderOperation::RenderText { line, area, alignment: Alignment::Center });
    }
}

fn unknown(kind: &str, area: &SlideArea, operations: &mut Vec<RenderOperation>) {
    let style = TextStyle::default().fg_color(colors::TABLE_CELL);
    let message = Line(vec![
        Text::new(icons::WARNING, style.fg_color(colors::QUOTE_ICON)),
        Text::new(format!(" Unknown slide type: {kind}"), style),
    ]);
    let rect = area.content.center(message.width() as u16 + 4, 3);
    operations.push(RenderOperation::Fill { rect, color: colors::TOOLTIP });
    let area = Rect { row: rect.row + 1, rows: 1, ..rect };
    operations.push(RenderOperation::RenderText { line: message, area, alignment: Alignment::Center });
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        navigation::NavigationState,
        render::canvas::Canvas,
        resource::{Resources, SlideImages},
        view::{
            animation::AnimationClock,
            render_slide,
            test::{context, draw, slide},
        },
    };
    use image::{DynamicImage, ImageFormat, RgbImage};
    use rstest::rstest;
    use std::time::Duration;

    /// Find the column and row where some text starts.
    fn find(canvas: &Canvas, needle: &str) -> Option<(u16, u16)> {
        canvas.lines().iter().enumerate().find_map(|(row, line)| {
            let index = line.find(needle)?;
            Some((line[..index].chars().count() as u16, row as u16))
        })
    }

    fn render(body: SlideBody, direction: Direction) -> Canvas {
        let navigation = NavigationState::new(1, 0);
        let images = SlideImages::default();
        let context = ViewContext { direction, ..context(&navigation, &images) };
        draw(&slide(body), &context)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn title_is_centered() {
        let canvas = render(
            SlideBody::Title { subtitle: Some("Seismology".into()), background_image: None },
            Direction::Rtl,
        );
        let (title_column, title_row) = find(&canvas, "Waves").expect("no title");
        let (_, subtitle_row) = find(&canvas, "Seismology").expect("no subtitle");
        assert_eq!(subtitle_row, title_row + 2);
        // The content area spans columns 6 to 73.
        assert_eq!(title_column, 6 + (67 - 5) / 2);
        assert!(canvas.cell(title_column, title_row).unwrap().style.is_bold());
    }

    #[rstest]
    #[case::ltr(Direction::Ltr)]
    #[case::rtl(Direction::Rtl)]
    fn columns_split(#[case] direction: Direction) {
        let paragraphs = strings(&["**Heading one**", "a **b** c", "**x** and **y**", "**Second**", "e"]);
        let canvas = render(SlideBody::ContentColumns { paragraphs }, direction);
        for line in canvas.lines() {
            assert!(!line.contains("**"), "{line}");
        }
        let (first, heading_row) = find(&canvas, "Heading one").expect("no heading");
        let (second, _) = find(&canvas, "Second").expect("no second column");
        assert!(find(&canvas, "a b c").is_some());
        assert!(find(&canvas, "x and y").is_some());
        match direction {
            Direction::Ltr => assert!(first < second),
            Direction::Rtl => assert!(first > second),
        };
        let cell = canvas.cell(first, heading_row).unwrap();
        assert!(cell.style.is_bold());
        assert_eq!(cell.style.colors.foreground, Some(colors::SUB_HEADING));
    }

    #[test]
    fn table_cells_under_headers() {
        let body = SlideBody::Table { headers: strings(&["A", "B"]), rows: vec![strings(&["x", "y"])] };
        let canvas = render(body, Direction::Ltr);
        let (a_column, header_row) = find(&canvas, "A").expect("no header");
        let (x_column, x_row) = find(&canvas, "x").expect("no x");
        let (b_column, _) = find(&canvas, "B").expect("no header");
        let (y_column, y_row) = find(&canvas, "y").expect("no y");
        assert_eq!((x_column, x_row), (a_column, header_row + 2));
        assert_eq!((y_column, y_row), (b_column, header_row + 2));
        assert!(canvas.cell(x_column, x_row).unwrap().style.is_bold());
        assert!(!canvas.cell(y_column, y_row).unwrap().style.is_bold());
    }

    #[test]
    fn table_columns_in_reading_order() {
        let body = SlideBody::Table { headers: strings(&["A", "B"]), rows: vec![] };
        let canvas = render(body, Direction::Rtl);
        let (a_column, _) = find(&canvas, "A").expect("no header");
        let (b_column, _) = find(&canvas, "B").expect("no header");
        assert!(a_column > b_column);
    }

    #[test]
    fn short_rows_leave_empty_cells() {
        let body = SlideBody::Table { headers: strings(&["Kind", "Speed", "Medium"]), rows: vec![strings(&["P"])] };
        let canvas = render(body, Direction::Ltr);
        let (column, row) = find(&canvas, "Kind").expect("no header");
        assert_eq!(find(&canvas, "P"), Some((column, row + 2)));
    }

    #[rstest]
    #[case::fits(&["abc", "de"], 20, &[5, 4])]
    #[case::shrunk(&["aaaaaaaa", "bbbbbbbbbbbbbbbbbb"], 15, &[5, 10])]
    #[case::empty(&[], 10, &[])]
    fn widths(#[case] headers: &[&str], #[case] max_width: u16, #[case] expected: &[u16]) {
        assert_eq!(column_widths(&strings(headers), &[], max_width), expected);
    }

    #[test]
    fn widths_include_rows() {
        let rows = vec![strings(&["longer", "x", "extra"])];
        assert_eq!(column_widths(&strings(&["a"]), &rows, 100), &[8, 3, 7]);
    }

    #[rstest]
    #[case::hidden(AnimationClock::Elapsed(Duration::ZERO), false)]
    #[case::shown(AnimationClock::Disabled, true)]
    fn bullets_fade_in(#[case] clock: AnimationClock, #[case] visible: bool) {
        let navigation = NavigationState::new(1, 0);
        let images = SlideImages::default();
        let context = ViewContext { clock, ..context(&navigation, &images) };
        let items = strings(&["P waves are fast", "S waves are slow"]);
        let canvas = draw(&slide(SlideBody::ContentList { items }), &context);

        let (column, row) = find(&canvas, "S waves").expect("no bullet");
        let palette = context.default_theme.palette();
        let cell = canvas.cell(column, row).unwrap();
        let expected = match visible {
            true => palette.foreground,
            false => palette.start.blend(palette.end, 0.5),
        };
        assert_eq!(cell.style.colors.foreground, Some(expected));
    }

    #[test]
    fn quotes_are_boxed() {
        let paragraphs = strings(&["The earth moves", "Second"]);
        let canvas = render(SlideBody::Quote { paragraphs }, Direction::Ltr);
        let (column, row) = find(&canvas, "\"The earth moves\"").expect("no quote");
        let (_, second_row) = find(&canvas, "\"Second\"").expect("no quote");
        assert_eq!(second_row, row + 4);

        let cell = canvas.cell(column, row).unwrap();
        assert!(cell.style.is_italics());
        assert_eq!(cell.style.colors.background, Some(colors::QUOTE_BACKGROUND));
    }

    #[rstest]
    #[case::decorated(vec![Decoration::ShadowZones], true)]
    #[case::plain(vec![], false)]
    fn diagram_decorations(#[case] decorations: Vec<Decoration>, #[case] expected: bool) {
        let lines = strings(&["**Step one**", "details about it"]);
        let canvas = render(SlideBody::Diagram { lines, decorations }, Direction::Ltr);
        let (heading_column, heading_row) = find(&canvas, "Step one").expect("no heading");
        let (detail_column, detail_row) = find(&canvas, "details").expect("no details");
        assert_eq!((detail_column, detail_row), (heading_column, heading_row + 1));
        assert_eq!(find(&canvas, "ϟ"), Some((heading_column - 2, heading_row)));
        assert_eq!(find(&canvas, "P-Wave Shadow").is_some(), expected);
        assert_eq!(find(&canvas, "Liquid Core blocks S").is_some(), expected);
    }

    #[rstest]
    #[case::list(SlideBody::ContentList { items: strings(&["5 ** 2 = 25"]) })]
    #[case::quote(SlideBody::Quote { paragraphs: strings(&["5 ** 2 = 25"]) })]
    #[case::table(SlideBody::Table { headers: strings(&["5 ** 2 = 25"]), rows: vec![] })]
    fn markers_kept_outside_columns_and_diagrams(#[case] body: SlideBody) {
        let canvas = render(body, Direction::Ltr);
        assert!(find(&canvas, "5 ** 2 = 25").is_some());
    }

    #[test]
    fn loaded_images_fit_above_caption() {
        let dir = tempfile::tempdir().expect("failed to create dir");
        let image = DynamicImage::ImageRgb8(RgbImage::new(8, 8));
        image.save_with_format(dir.path().join("station.png"), ImageFormat::Png).expect("failed to save");
        let images = vec![ImageRef { url: "station.png".into(), caption: Some("Station".into()) }];
        let slide = slide(SlideBody::ImageGrid { images });
        let images = Resources::new(dir.path()).slide_images(&slide);
        let navigation = NavigationState::new(1, 0);
        let context = context(&navigation, &images);

        let frame = render_slide(&slide, &context).expect("render failed");
        let picture = frame
            .operations
            .iter()
            .find_map(|op| match op {
                RenderOperation::RenderImage { rect, fit: ImageFit::Contain, .. } => Some(*rect),
                _ => None,
            })
            .expect("no image");
        let canvas = draw(&slide, &context);
        let (_, caption_row) = find(&canvas, "Station").expect("no caption");
        assert_eq!(caption_row, picture.bottom_edge());
        assert!(find(&canvas, "station.png").is_none());
    }

    #[test]
    fn missing_images_show_placeholder() {
        let images = vec![
            ImageRef { url: "https://x.io/a.jpg".into(), caption: Some("Seismograph".into()) },
            ImageRef { url: "missing.png".into(), caption: None },
        ];
        let canvas = render(SlideBody::ImageGrid { images }, Direction::Ltr);
        let (placeholder, _) = find(&canvas, "https://x.io/a.jpg").expect("no placeholder");
        let (caption, _) = find(&canvas, "Seismograph").expect("no caption");
        let (second, _) = find(&canvas, "missing.png").expect("no placeholder");
        assert!(placeholder < second);
        assert!(caption < second);
    }

    #[test]
    fn unknown_placeholder() {
        let canvas = render(SlideBody::Unknown { kind: "video".into() }, Direction::Ltr);
        assert!(find(&canvas, "Unknown slide type: video").is_some());
    }
}
