use futures::future::try_join_all;
use itertools::Itertools;
use log::debug;
use std::{collections::BTreeMap, iter::successors, sync::Arc};
use time::Date;

use super::{
    DailyNormal, Error, Precipitation, StationSummary, TemperatureObservation,
    TemperatureObservations,
};
use crate::{
    dates::{format_date, one_year_before, parse_date, MonthDay, OPEN_END_DATE},
    db::{self, ObservationData, StationActivity, StationRainfall, TemperatureStats},
};

/// Longest span of calendar days a single trip-normals request may cover.
pub const MAX_TRIP_DAYS: i64 = 366;

/// Answers the fixed set of observation queries on top of an injected store.
pub struct ClimateService {
    store: Arc<dyn ObservationData>,
}

impl ClimateService {
    pub fn new(store: Arc<dyn ObservationData>) -> Self {
        Self { store }
    }

    /// Stations ascending by id, each id once.
    pub async fn list_stations(&self) -> Result<Vec<StationSummary>, Error> {
        let stations = self.store.stations().await?;

        Ok(stations
            .into_iter()
            .sorted_by(|a, b| a.station.cmp(&b.station))
            .dedup_by(|a, b| a.station == b.station)
            .map(|station| StationSummary {
                station: station.station,
                name: station.name,
            })
            .collect())
    }

    /// Precipitation readings on or after the start of the trailing year.
    pub async fn precipitation_last_year(&self) -> Result<Precipitation, Error> {
        let Some(start) = self.window_start().await? else {
            return Ok(Precipitation::default());
        };

        let mut by_date: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for measurement in self.store.precipitation_since(start).await? {
            if let Some(prcp) = measurement.prcp {
                by_date
                    .entry(measurement.date)
                    .or_default()
                    .insert(measurement.station, prcp);
            }
        }

        Ok(Precipitation(by_date))
    }

    /// Temperatures of the most active station strictly after the start of the trailing year.
    pub async fn temperature_observations_last_year(
        &self,
    ) -> Result<TemperatureObservations, Error> {
        let Some(start) = self.window_start().await? else {
            return Ok(TemperatureObservations::default());
        };

        let activity = self.store.station_activity().await?;
        let Some(station) = most_active_station(activity) else {
            return Ok(TemperatureObservations::default());
        };
        debug!("most active station: {}", station);

        let observations = self
            .store
            .temperatures_after(&station, start)
            .await?
            .into_iter()
            .sorted_by(|a, b| a.date.cmp(&b.date))
            .map(|m| TemperatureObservation {
                date: m.date,
                tobs: m.tobs,
            })
            .collect();

        Ok(TemperatureObservations {
            station: Some(station),
            observations,
        })
    }

    /// Min/avg/max temperature over `start..=end`; a missing end means no upper bound.
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, Error> {
        let start = parse_input_date(start)?;
        let end = parse_input_date(end.unwrap_or(OPEN_END_DATE))?;
        if start > end {
            return Ok(TemperatureStats::default());
        }

        Ok(self.store.temperature_stats(start, end).await?)
    }

    /// Min/avg/max temperature across every year for one `MM-DD`.
    pub async fn daily_normals(&self, month_day: &str) -> Result<TemperatureStats, Error> {
        let month_day = MonthDay::parse(month_day)
            .ok_or_else(|| Error::InvalidMonthDay(month_day.to_string()))?;

        Ok(self.store.daily_normals(month_day).await?)
    }

    /// Daily normals for every calendar day of a trip.
    pub async fn trip_normals(&self, start: &str, end: &str) -> Result<Vec<DailyNormal>, Error> {
        let start = parse_input_date(start)?;
        let end = parse_input_date(end)?;
        if start > end {
            return Err(Error::InvalidRange(format!(
                "{} is after {}",
                format_date(start),
                format_date(end)
            )));
        }
        if (end - start).whole_days() >= MAX_TRIP_DAYS {
            return Err(Error::InvalidRange(format!(
                "trips are limited to {} days",
                MAX_TRIP_DAYS
            )));
        }

        let days: Vec<Date> = successors(Some(start), |day| day.next_day())
            .take_while(|day| *day <= end)
            .collect();
        let normals = try_join_all(
            days.iter()
                .map(|day| self.store.daily_normals(MonthDay::from(*day))),
        )
        .await?;

        Ok(days
            .into_iter()
            .zip(normals)
            .map(|(day, stats)| DailyNormal::new(format_date(day), stats))
            .collect())
    }

    /// Total precipitation per station over `start..=end`, wettest first.
    pub async fn rainfall_by_station(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<StationRainfall>, Error> {
        let start = parse_input_date(start)?;
        let end = parse_input_date(end)?;
        if start > end {
            return Ok(vec![]);
        }

        Ok(self.store.rainfall_by_station(start, end).await?)
    }

    /// Same month and day one year before the latest measurement.
    async fn window_start(&self) -> Result<Option<Date>, Error> {
        let Some(latest) = self.store.latest_date().await? else {
            return Ok(None);
        };
        let start = one_year_before(latest)
            .map_err(|_| db::Error::StoredDate(format_date(latest)))?;
        debug!(
            "trailing year window: {} to {}",
            format_date(start),
            format_date(latest)
        );
        Ok(Some(start))
    }
}

fn parse_input_date(value: &str) -> Result<Date, Error> {
    parse_date(value).map_err(|_| Error::InvalidDate(value.to_string()))
}

/// Highest observation count wins; equal counts go to the smallest station id.
pub fn most_active_station(activity: Vec<StationActivity>) -> Option<String> {
    activity
        .into_iter()
        .max_by(|a, b| {
            a.observations
                .cmp(&b.observations)
                .then_with(|| b.station.cmp(&a.station))
        })
        .map(|a| a.station)
}
