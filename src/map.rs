use crate::{
    basemap::BaseMap,
    data::{coerce_state, coerce_year, Accident, AsInteger, Coordinate, Error},
    read::AccidentSource,
};
use geo::{BoundingRect, MultiPoint, Rect};
use plotters::prelude::*;
use std::{collections::BTreeSet, fmt, ops::Range, path::Path};
use tracing::info;

const MAP_SIZE: (u32, u32) = (800, 600);
/// Smallest extent of an axis, in degrees, so a lone crash still gets a map around it.
const MIN_SPAN: f64 = 0.5;

/// What `map_state` ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapOutcome {
    Rendered { points: usize },
    NothingToPlot,
}

/// Locations of `state`'s accidents, sentinels already dropped to `None`.
///
/// Fails with `Error::InvalidState` when `state` is not a number or none of the
/// accidents belong to it.
pub fn state_coordinates<S: AsInteger + ?Sized>(
    accidents: &[Accident],
    state: &S,
) -> Result<Vec<Coordinate>, Error> {
    let code = coerce_state(state)?;
    let known: BTreeSet<_> = accidents.iter().map(|accident| accident.state).collect();
    if !known.contains(&code) {
        return Err(Error::InvalidState(state.to_string()));
    }
    Ok(accidents
        .iter()
        .filter(|accident| accident.state == code)
        .map(Coordinate::from)
        .collect())
}

/// Draws the accidents of one state and year on top of `base_map` and writes the
/// SVG to `output`. Nothing is written when there is nothing to show.
pub fn map_state<Src, S, Y>(
    source: &Src,
    state: S,
    year: Y,
    base_map: &BaseMap,
    output: &Path,
) -> Result<MapOutcome, Error>
where
    Src: AccidentSource + ?Sized,
    S: AsInteger,
    Y: AsInteger,
{
    let year = coerce_year(&year)?;
    let accidents = source.accidents(year)?;
    let points: Vec<(f64, f64)> = state_coordinates(&accidents, &state)?
        .iter()
        .filter_map(Coordinate::point)
        .collect();
    // Covers both no matching accident and no accident with a known location.
    let Some(bounds) = MultiPoint::from(points.clone()).bounding_rect() else {
        info!(%state, year, "no accidents to plot");
        return Ok(MapOutcome::NothingToPlot);
    };
    render(&points, bounds, base_map, output)?;
    info!(%state, year, points = points.len(), output = %output.display(), "Map written");
    Ok(MapOutcome::Rendered {
        points: points.len(),
    })
}

fn render(
    points: &[(f64, f64)],
    bounds: Rect<f64>,
    base_map: &BaseMap,
    output: &Path,
) -> Result<(), Error> {
    let root = SVGBackend::new(output, MAP_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(
            axis(bounds.min().x, bounds.max().x),
            axis(bounds.min().y, bounds.max().y),
        )
        .map_err(plot_error)?;
    for outline in base_map.outlines() {
        chart
            .draw_series(LineSeries::new(
                outline.coords().map(|coord| (coord.x, coord.y)),
                &BLACK,
            ))
            .map_err(plot_error)?;
    }
    chart
        .draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 2, RED.filled())),
        )
        .map_err(plot_error)?;
    root.present().map_err(plot_error)?;
    Ok(())
}

fn axis(min: f64, max: f64) -> Range<f64> {
    if max - min >= MIN_SPAN {
        return min..max;
    }
    let middle = (min + max) / 2.0;
    middle - MIN_SPAN / 2.0..middle + MIN_SPAN / 2.0
}

fn plot_error<E: fmt::Display>(e: E) -> Error {
    Error::Plot(e.to_string())
}
