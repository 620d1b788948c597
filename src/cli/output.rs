use chrono::{DateTime, SecondsFormat, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};

use groundtrack::trajectory::{GeodeticPoint, Trajectory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Csv,
}

#[derive(Debug, Serialize)]
struct Row {
    time: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
    altitude_m: f64,
}

impl Row {
    fn from_point(point: &GeodeticPoint, degrees: bool) -> Self {
        let (latitude, longitude) = if degrees {
            (point.latitude_deg(), point.longitude_deg())
        } else {
            (point.latitude, point.longitude)
        };
        Self {
            time: point.time,
            latitude,
            longitude,
            altitude_m: point.altitude,
        }
    }
}

#[derive(Debug, Serialize)]
struct Document<'a> {
    name: Option<&'a str>,
    epoch: DateTime<Utc>,
    period_s: f64,
    output_interval_s: f64,
    angle_unit: &'static str,
    points: Vec<Row>,
}

pub fn write_trajectory(
    out: &mut impl Write,
    trajectory: &Trajectory,
    name: Option<&str>,
    format: Format,
    degrees: bool,
) -> io::Result<()> {
    match format {
        Format::Json => write_json(out, trajectory, name, degrees),
        Format::Csv => write_csv(out, trajectory, degrees),
    }
}

fn write_json(
    out: &mut impl Write,
    trajectory: &Trajectory,
    name: Option<&str>,
    degrees: bool,
) -> io::Result<()> {
    let document = Document {
        name,
        epoch: trajectory.epoch(),
        period_s: trajectory.period(),
        output_interval_s: trajectory.output_interval(),
        angle_unit: if degrees { "deg" } else { "rad" },
        points: trajectory
            .iter()
            .map(|p| Row::from_point(p, degrees))
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out)
}

fn write_csv(out: &mut impl Write, trajectory: &Trajectory, degrees: bool) -> io::Result<()> {
    let unit = if degrees { "deg" } else { "rad" };
    writeln!(out, "time,latitude_{unit},longitude_{unit},altitude_m")?;
    for point in trajectory {
        let row = Row::from_point(point, degrees);
        writeln!(
            out,
            "{},{:.9},{:.9},{:.3}",
            row.time.to_rfc3339_opts(SecondsFormat::Millis, true),
            row.latitude,
            row.longitude,
            row.altitude_m
        )?;
    }
    Ok(())
}
