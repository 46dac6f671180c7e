//! Poll loop: fetch, render, push, wait

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, instrument, warn};

use crate::config::StationConfig;
use crate::display::{PngPreviewSink, RasterSink};
use crate::icons::IconDirectory;
use crate::models::WeatherSnapshot;
use crate::render::LayoutEngine;
use crate::weather::{FetchError, ForecastSource, ObservationSource, OpenMeteoClient, UndergroundClient, http_client};
use crate::StationError;

/// What a single cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A fresh frame was pushed to the sink
    Rendered,
    /// Some data was missing; the panel keeps its previous frame
    Skipped,
}

pub struct Station {
    observations: Arc<dyn ObservationSource>,
    forecast: Arc<dyn ForecastSource>,
    engine: LayoutEngine,
    sink: Box<dyn RasterSink>,
    interval: Duration,
}

impl Station {
    pub fn new(
        observations: Arc<dyn ObservationSource>,
        forecast: Arc<dyn ForecastSource>,
        engine: LayoutEngine,
        sink: Box<dyn RasterSink>,
        interval: Duration,
    ) -> Self {
        Self {
            observations,
            forecast,
            engine,
            sink,
            interval,
        }
    }

    /// Wire the HTTP sources, icon directory and preview sink from configuration
    pub fn from_config(config: &StationConfig) -> crate::Result<Self> {
        let client = http_client(config.timeout())?;
        let observations = UndergroundClient::new(
            client.clone(),
            &config.station.base_url,
            &config.station.station_id,
            &config.station.api_key,
        );
        let forecast = OpenMeteoClient::new(client, &config.forecast.base_url, config.location.clone());

        let (width, height) = (config.display.width, config.display.height);
        let icons = Arc::new(IconDirectory::new(&config.icons.directory));
        let engine = LayoutEngine::new(width, height, config.location.name.clone(), icons);
        let sink = PngPreviewSink::new(&config.display.preview_path, width, height);

        Ok(Self::new(
            Arc::new(observations),
            Arc::new(forecast),
            engine,
            Box::new(sink),
            config.interval(),
        ))
    }

    /// Fetch everything, and render only if every fetch succeeded
    #[instrument(skip(self))]
    pub async fn run_cycle(&mut self) -> crate::Result<CycleOutcome> {
        let captured_at = Local::now().naive_local();

        let current = keep_ok("station observations", self.observations.current_conditions().await);
        let forecast = keep_ok("daily forecast", self.forecast.daily_forecast().await);
        let condition = keep_ok("current condition code", self.forecast.current_code().await);

        let Some(snapshot) = WeatherSnapshot::assemble(current, forecast, condition, captured_at) else {
            warn!("Weather data incomplete, keeping the previous frame");
            return Ok(CycleOutcome::Skipped);
        };

        info!(
            condition = %snapshot.condition,
            temperature = %snapshot.current.format_temperature(),
            "Rendering snapshot"
        );
        let frame = self.engine.render(&snapshot);
        self.sink.display(&frame.black, &frame.red)?;
        Ok(CycleOutcome::Rendered)
    }

    /// Clear the panel, then run a cycle on every tick until `shutdown` resolves.
    ///
    /// A cycle in progress always finishes; the panel is put to sleep on the way out.
    pub async fn run(&mut self, shutdown: impl Future<Output = ()>) -> crate::Result<()> {
        if let Err(e) = self.sink.clear() {
            warn!(error = %e, "Failed to clear display at startup");
        }

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut shutdown = std::pin::pin!(shutdown);

        info!(interval_seconds = self.interval.as_secs(), "Station started");
        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = ticker.tick() => match self.run_cycle().await {
                    Ok(CycleOutcome::Rendered) => info!("Display updated"),
                    Ok(CycleOutcome::Skipped) => {}
                    Err(e) if e.is_transient() => error!(error = %e, "Cycle failed: {}", e.user_message()),
                    Err(e) => return Err(e),
                },
            }
        }

        info!("Shutting down, putting display to sleep");
        self.sink.sleep().map_err(StationError::from)
    }
}

fn keep_ok<T>(what: &str, result: Result<T, FetchError>) -> Option<T> {
    result
        .inspect_err(|e| warn!(error = %e, "Failed to fetch {what}"))
        .ok()
}
