// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted walkthrough of the agenda charts.
//!
//! Loads a dataset, drives both charts through rendering, hovering, showing, hiding and
//! zooming, and writes a snapshot of each settled state into one HTML report.

mod html;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use agenda_charts::{
    Attr, ChartOptions, EventHandlers, MemberRecord, MembersChart, PartiesChart, Party, PartyId,
    PartyRecord, PointerEvent, Renderable, Zoom, row_id,
};
use clap::Parser;
use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = include_str!("../data/sample.json");

#[derive(Debug, Parser)]
#[command(version, about = "Render an agenda chart walkthrough to HTML")]
struct Args {
    /// Dataset with `parties`, `members` and optional `options`. Defaults to the bundled sample.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Where to write the report.
    #[arg(long, default_value = "agenda_charts_demo.html")]
    out: PathBuf,
}

#[derive(Debug, Error)]
enum DemoError {
    #[error("cannot read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot write report {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Dataset {
    parties: Vec<PartyRecord>,
    members: Vec<MemberRecord>,
    options: ChartOptions,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run(&Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "demo failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), DemoError> {
    let dataset = load(args.data.as_deref())?;
    tracing::info!(
        parties = dataset.parties.len(),
        members = dataset.members.len(),
        "dataset loaded"
    );

    let mut sections = parties_walkthrough(&dataset);
    sections.extend(members_walkthrough(&dataset));

    let report = html::render_report("Agenda charts", &sections);
    std::fs::write(&args.out, report).map_err(|source| DemoError::Write {
        path: args.out.clone(),
        source,
    })?;
    println!("wrote {}", args.out.display());
    Ok(())
}

fn load(path: Option<&Path>) -> Result<Dataset, DemoError> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| DemoError::Read {
            path: path.to_owned(),
            source,
        })?,
        None => SAMPLE.to_owned(),
    };
    Ok(serde_json::from_str(&text)?)
}

fn snapshot(title: &str, description: impl Into<String>, svg: String) -> html::HtmlSection {
    html::HtmlSection {
        title: title.to_owned(),
        description: description.into(),
        svg,
    }
}

fn parties_walkthrough(dataset: &Dataset) -> Vec<html::HtmlSection> {
    let handlers = EventHandlers::default().on_click(|party: &Party, row, _| {
        tracing::info!(party = %party.name, row, "party clicked");
    });
    let mut chart =
        PartiesChart::new(dataset.options.clone(), &dataset.parties).with_handlers(handlers);
    let mut sections = Vec::new();

    chart.draw();
    chart.settle();
    sections.push(snapshot(
        "Parties",
        "Bubbles grow in one after another, largest party first.",
        chart.surface().to_svg_string(),
    ));

    let center = chart
        .surface()
        .get(row_id(0))
        .and_then(|m| Some((m.get(Attr::Cx)?, m.get(Attr::Cy)?)));
    if let Some(center) = center {
        chart.handle_event(PointerEvent::moved(center));
        chart.handle_event(PointerEvent::click(center));
        sections.push(snapshot(
            "Parties: hover",
            format!(
                "Hovering the largest party outlines it; the tooltip reads \"{}\".",
                chart.tooltip().content()
            ),
            chart.surface().to_svg_string(),
        ));
        chart.handle_event(PointerEvent::leave());
    }

    chart.zoom(Zoom::In);
    chart.settle();
    sections.push(snapshot(
        "Parties: zoomed in",
        format!("Score axis narrowed to {:?}.", chart.x_domain()),
        chart.surface().to_svg_string(),
    ));

    chart.zoom(Zoom::Out);
    chart.settle();
    sections.push(snapshot(
        "Parties: zoomed out",
        "Back on the full score axis.",
        chart.surface().to_svg_string(),
    ));

    sections
}

fn members_walkthrough(dataset: &Dataset) -> Vec<html::HtmlSection> {
    let mut chart = MembersChart::new(dataset.options.clone(), &dataset.members);
    let mut sections = Vec::new();

    chart.render(true);
    chart.settle();
    sections.push(snapshot(
        "Members",
        format!(
            "{} bars, {} px wide, ordered by score.",
            chart.data().len(),
            chart.bar_width()
        ),
        chart.surface().to_svg_string(),
    ));

    let Some(party) = dataset.parties.iter().find_map(|p| p.id) else {
        return sections;
    };
    let others: Vec<PartyId> = dataset
        .parties
        .iter()
        .filter_map(|p| p.id)
        .filter(|&id| id != party)
        .collect();

    for &other in &others {
        chart.hide(other, false);
    }
    chart.show(party, true);
    chart.settle();
    sections.push(snapshot(
        "Members: one party",
        format!("Every party but {} hidden; {} pinned.", party.0, party.0),
        chart.surface().to_svg_string(),
    ));

    chart.zoom(Zoom::In);
    chart.settle();
    sections.push(snapshot(
        "Members: zoomed in",
        format!(
            "Score axis fitted to the {} selected members: {:?}.",
            chart.displayed().len(),
            chart.x_domain()
        ),
        chart.surface().to_svg_string(),
    ));

    show_everyone(&mut chart, party, &others);
    sections.push(snapshot(
        "Members: everyone",
        "Pin released, all parties shown, full score axis.",
        chart.surface().to_svg_string(),
    ));

    sections
}

/// Releases the pin on `party`, shows it and every other party, and zooms out.
fn show_everyone(chart: &mut MembersChart, party: PartyId, others: &[PartyId]) {
    chart.toggle(party, true);
    chart.show(party, false);
    for &other in others {
        chart.show(other, false);
    }
    chart.zoom(Zoom::Out);
    chart.settle();
}
