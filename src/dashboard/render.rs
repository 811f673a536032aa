use std::f64::consts::PI;
use std::fmt::Write;

use super::{Bar, ChampionDetail, ChampionLookup, Leaderboard, Metric, RollupTable, WinRate};

pub(crate) const NO_DATA: &str = "No data for the selected champion";

const BAR_WIDTH: f64 = 360.0;
const BAR_HEIGHT: f64 = 22.0;

/// The whole dashboard page: selector, full table and, when a champion is
/// selected, its detail section.
pub(crate) fn page(table: &RollupTable, selected: Option<&str>) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Champion statistics</title>\n<style>\n\
         body{font-family:sans-serif;margin:2em}\
         table{border-collapse:collapse}\
         td,th{border:1px solid #ccc;padding:4px 8px;text-align:right}\
         .cards{display:flex;flex-wrap:wrap;gap:1em}\
         .card{border:1px solid #ccc;padding:.5em 1em}\n\
         </style>\n</head>\n<body>\n<h1>Champion statistics</h1>\n",
    );

    selector(&mut html, table, selected);
    if let Some(champion) = selected {
        match table.lookup(champion) {
            ChampionLookup::Found(detail) => detail_section(&mut html, &detail),
            ChampionLookup::NoData => {
                let _ = writeln!(html, "<p class=\"no-data\">{NO_DATA}</p>");
            }
        }
    }
    full_table(&mut html, table);

    html.push_str("</body>\n</html>\n");
    html
}

fn selector(html: &mut String, table: &RollupTable, selected: Option<&str>) {
    html.push_str("<form method=\"get\" action=\"/\">\n<select name=\"champion\">\n");
    for champion in table.champions() {
        let marker = if selected == Some(champion) {
            " selected"
        } else {
            ""
        };
        let name = escape(champion);
        let _ = writeln!(html, "<option value=\"{name}\"{marker}>{name}</option>");
    }
    html.push_str("</select>\n<button type=\"submit\">Show stats</button>\n</form>\n");
}

fn full_table(html: &mut String, table: &RollupTable) {
    html.push_str("<h2>All champions</h2>\n<table>\n<tr><th>champion</th>");
    for metric in Metric::all() {
        let _ = write!(html, "<th>{metric}</th>");
    }
    html.push_str("</tr>\n");

    for row in table.rows() {
        let _ = write!(
            html,
            "<tr><td>{}</td>",
            escape(row.champion.as_deref().unwrap_or("-"))
        );
        for metric in Metric::all() {
            match metric.value(row) {
                Some(value) => {
                    let _ = write!(html, "<td>{}</td>", number(value));
                }
                None => html.push_str("<td></td>"),
            }
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
}

fn detail_section(html: &mut String, detail: &ChampionDetail) {
    let name = escape(detail.rollup.champion.as_deref().unwrap_or_default());
    let _ = writeln!(html, "<section class=\"detail\">\n<h2>{name}</h2>");

    html.push_str("<div class=\"cards\">\n");
    for card in &detail.cards {
        let _ = writeln!(
            html,
            "<div class=\"card\"><div>{}</div><strong>{}</strong></div>",
            escape(&card.label),
            number(card.value)
        );
    }
    html.push_str("</div>\n");

    html.push_str("<h3>Win rate</h3>\n");
    pie(html, detail.win_rate);

    html.push_str("<h3>Averages</h3>\n");
    bars(html, &detail.stats);

    for board in &detail.leaderboards {
        leaderboard(html, board);
    }
    html.push_str("</section>\n");
}

fn leaderboard(html: &mut String, board: &Leaderboard) {
    let _ = writeln!(html, "<h3>{}</h3>", escape(&board.title));
    bars(html, &board.entries);
}

/// Two-slice SVG pie of wins and losses.
fn pie(html: &mut String, win_rate: WinRate) {
    const R: f64 = 80.0;
    let _ = writeln!(
        html,
        "<svg class=\"pie\" width=\"200\" height=\"200\" viewBox=\"-100 -100 200 200\">"
    );

    let games = win_rate.wins + win_rate.losses;
    if win_rate.wins == 0 || win_rate.losses == 0 {
        let fill = if win_rate.wins > 0 { "#4caf50" } else { "#e53935" };
        let _ = writeln!(html, "<circle r=\"{R}\" fill=\"{fill}\"/>");
    } else {
        let angle = 2.0 * PI * win_rate.wins as f64 / games as f64;
        let (x, y) = (R * angle.sin(), -R * angle.cos());
        let large = u8::from(angle > PI);
        let _ = writeln!(
            html,
            "<path d=\"M0 0 L0 {top} A{R} {R} 0 {large} 1 {x:.2} {y:.2} Z\" fill=\"#4caf50\"/>",
            top = -R
        );
        let _ = writeln!(
            html,
            "<path d=\"M0 0 L{x:.2} {y:.2} A{R} {R} 0 {rest} 1 0 {top} Z\" fill=\"#e53935\"/>",
            rest = 1 - large,
            top = -R
        );
    }
    let _ = writeln!(
        html,
        "</svg>\n<p>{} wins, {} losses ({}%)</p>",
        win_rate.wins,
        win_rate.losses,
        number(win_rate.ratio * 100.0)
    );
}

/// Horizontal SVG bars scaled to the largest value.
fn bars(html: &mut String, entries: &[Bar]) {
    if entries.is_empty() {
        html.push_str("<p>-</p>\n");
        return;
    }
    let max = entries.iter().map(|bar| bar.value).fold(0.0_f64, f64::max);
    let height = BAR_HEIGHT * entries.len() as f64;
    let _ = writeln!(
        html,
        "<svg class=\"bars\" width=\"{}\" height=\"{height}\">",
        BAR_WIDTH * 2.0
    );
    for (i, bar) in entries.iter().enumerate() {
        let y = BAR_HEIGHT * i as f64;
        let width = if max > 0.0 {
            BAR_WIDTH * bar.value / max
        } else {
            0.0
        };
        let _ = writeln!(
            html,
            "<text x=\"0\" y=\"{}\">{}</text>\
             <rect x=\"{BAR_WIDTH}\" y=\"{}\" width=\"{width:.1}\" height=\"{}\" fill=\"#3f51b5\"/>\
             <title>{}</title>",
            y + BAR_HEIGHT * 0.7,
            escape(&bar.label),
            y + 2.0,
            BAR_HEIGHT - 4.0,
            number(bar.value)
        );
    }
    html.push_str("</svg>\n");
}

fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
