use anyhow::Result;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::client::HttpFetcher;
use crate::dispatch;
use crate::error::WeatherError;
use crate::models::{GetAlertsRequest, GetForecastRequest};
use crate::regions::Region;

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    fetcher: Arc<HttpFetcher>,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service instance
    pub fn new() -> Result<Self> {
        Ok(Self {
            fetcher: Arc::new(HttpFetcher::new()?),
            tool_router: Self::tool_router(),
        })
    }

    async fn regional_forecast(
        &self,
        request: GetForecastRequest,
        region: Region,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting {} forecast for coordinates: {}, {}",
            region.label(),
            request.latitude,
            request.longitude
        );

        let result = dispatch::get_regional_forecast(
            self.fetcher.as_ref(),
            request.latitude,
            request.longitude,
            region.key(),
        )
        .await;
        Ok(into_tool_result(result))
    }

    async fn regional_alerts(
        &self,
        request: GetForecastRequest,
        region: Region,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting {} alerts for coordinates: {}, {}",
            region.label(),
            request.latitude,
            request.longitude
        );

        let result = dispatch::get_regional_weather_alerts(
            self.fetcher.as_ref(),
            request.latitude,
            request.longitude,
            region.key(),
        )
        .await;
        Ok(into_tool_result(result))
    }
}

/// Degraded answers are still successful tool results carrying the message
fn into_tool_result(result: Result<String, WeatherError>) -> CallToolResult {
    let text = result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "returning degraded answer");
        e.to_string()
    });
    CallToolResult::success(vec![Content::text(text)])
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mcp-regional-weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Weather alerts and forecasts for the US (National Weather Service), \
                the UK and Japan (Open-Meteo). UK and Japan alerts are derived from \
                regional wind, temperature and precipitation thresholds."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Gets active weather alerts for a US state
    #[tool(description = "Get weather alerts for a US state. Provide a two-letter US state code (e.g. CA, NY).")]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting alerts for state: {}", request.state);

        let result = dispatch::get_alerts(self.fetcher.as_ref(), &request.state).await;
        Ok(into_tool_result(result))
    }

    /// Gets the NWS forecast for a US location
    #[tool(description = "Get weather forecast for a US location. Provide latitude and longitude (e.g. latitude: 40.7128, longitude: -74.0060 for New York).")]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting forecast for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let result =
            dispatch::get_forecast(self.fetcher.as_ref(), request.latitude, request.longitude)
                .await;
        Ok(into_tool_result(result))
    }

    #[tool(description = "Get weather forecast for a UK location using Open-Meteo API. Provide latitude and longitude (e.g. latitude: 51.5074, longitude: -0.1278 for London).")]
    async fn get_uk_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.regional_forecast(request, Region::Uk).await
    }

    #[tool(description = "Get weather alerts for a UK location using Open-Meteo API. Provide latitude and longitude.")]
    async fn get_uk_weather_alerts(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.regional_alerts(request, Region::Uk).await
    }

    #[tool(description = "Get weather forecast for a Japan location using Open-Meteo API. Provide latitude and longitude (e.g. latitude: 35.6762, longitude: 139.6503 for Tokyo).")]
    async fn get_japan_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.regional_forecast(request, Region::Japan).await
    }

    #[tool(description = "Get weather alerts for a Japan location using Open-Meteo API. Provide latitude and longitude.")]
    async fn get_japan_weather_alerts(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.regional_alerts(request, Region::Japan).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_answer_is_a_success() {
        let result = into_tool_result(Err(WeatherError::InvalidRegion("mars".into())));
        assert_ne!(result.is_error, Some(true));
    }

    #[test]
    fn server_info_advertises_tools() {
        let weather = Weather::new().unwrap();
        let info = weather.get_info();
        assert_eq!(info.server_info.name, "mcp-regional-weather");
        assert!(info.capabilities.tools.is_some());
    }
}
