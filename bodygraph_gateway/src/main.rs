use std::env;
use std::error::Error;
use std::fmt;

use bodygraph_core::{
    active_gates, areas_of_definition, classify_definition, defined_centers, gate_name,
    open_centers, parse_channels, Activations, BirthInfo, Chart, HumanDesignType,
};
use chrono::{NaiveDate, NaiveTime};
use reqwest::Client;
use serde::{Deserialize, Serialize};

// The hosted Human Design calculation service. Both can be overridden via
// the environment; the token has no default.
const DEFAULT_API_URL: &str = "https://humandesignmcp-production.up.railway.app";

fn api_url() -> String {
    env::var("HD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

fn api_token() -> Result<String, GatewayError> {
    env::var("HD_API_TOKEN").map_err(|_| GatewayError::MissingToken)
}

// ---------------------------
// ## Error Handling
// ---------------------------

#[derive(Debug)]
enum GatewayError {
    MissingToken,
    Http(reqwest::Error),
    Service { status: u16, message: String },
    MalformedResponse(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::MissingToken => write!(f, "HD_API_TOKEN is not set"),
            GatewayError::Http(err) => write!(f, "HTTP Error: {}", err),
            GatewayError::Service { status, message } => {
                write!(f, "Service Error {}: {}", status, message)
            }
            GatewayError::MalformedResponse(msg) => write!(f, "Malformed Response: {}", msg),
        }
    }
}

impl Error for GatewayError {}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Http(err)
    }
}

// ---------------------------
// ## Wire Types
// ---------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalcRequest {
    birth_date: String,
    birth_time: String,
    birth_location: String,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<ApiChart>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiChart {
    #[serde(rename = "type")]
    hd_type: HumanDesignType,
    strategy: String,
    authority: String,
    profile: String,
    incarnation_cross: String,
    personality: Activations,
    design: Activations,
    channels: Vec<String>,
}

// ---------------------------
// ## Service Calls
// ---------------------------

async fn health_check(client: &Client, base: &str) -> Result<String, GatewayError> {
    let response = client.get(format!("{}/health", base)).send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(GatewayError::Service { status: status.as_u16(), message: body });
    }
    Ok(body)
}

async fn fetch_chart(
    client: &Client,
    base: &str,
    token: &str,
    birth: &BirthInfo,
) -> Result<ApiChart, GatewayError> {
    let request = CalcRequest {
        birth_date: birth.birth_date.format("%Y-%m-%d").to_string(),
        birth_time: birth.birth_time.format("%H:%M").to_string(),
        birth_location: birth.birth_location.clone(),
    };

    let response = client
        .post(format!("{}/api/human-design", base))
        .bearer_auth(token)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(GatewayError::Service { status: status.as_u16(), message });
    }

    let envelope: ApiEnvelope = response.json().await?;
    if !envelope.success {
        return Err(GatewayError::Service {
            status: status.as_u16(),
            message: envelope.error.unwrap_or_else(|| "calculation failed".to_string()),
        });
    }
    envelope
        .data
        .ok_or_else(|| GatewayError::MalformedResponse("missing chart payload".to_string()))
}

/// Builds the chart from the service payload. The definition label and the
/// center lists come from the local classifier, not from the service.
fn assemble_chart(birth: BirthInfo, api: ApiChart) -> Chart {
    let channels = parse_channels(api.channels.iter().map(String::as_str));
    Chart {
        definition: classify_definition(channels.iter().copied()),
        defined_centers: defined_centers(channels.iter().copied()),
        open_centers: open_centers(channels.iter().copied()),
        active_gates: active_gates(&api.personality, &api.design),
        birth,
        hd_type: api.hd_type,
        strategy: api.strategy,
        authority: api.authority,
        profile: api.profile,
        incarnation_cross: api.incarnation_cross,
        channels,
        personality: api.personality,
        design: api.design,
    }
}

// ---------------------------
// ## Output
// ---------------------------

fn print_chart(chart: &Chart) {
    println!("Human Design Chart");
    if let Some(name) = &chart.birth.name {
        println!("Name: {}", name);
    }
    println!(
        "Born: {} {} in {}",
        chart.birth.birth_date, chart.birth.birth_time, chart.birth.birth_location
    );
    println!("----------------------------------------");
    println!("Type: {} ({})", chart.hd_type, chart.hd_type.aura());
    println!("Strategy: {}", chart.strategy);
    println!("Authority: {}", chart.authority);
    println!("Profile: {}", chart.profile);
    println!("Definition: {}", chart.definition);
    println!("Incarnation Cross: {}", chart.incarnation_cross);

    println!();
    println!("Defined centers:");
    for center in &chart.defined_centers {
        println!("  {} ({})", center, center.theme());
    }
    println!("Open centers:");
    for center in &chart.open_centers {
        println!("  {} ({})", center, center.not_self_theme());
    }

    println!();
    println!("Channels:");
    for channel in &chart.channels {
        match channel.info() {
            Some(info) => println!("  {}  {} ({}, {})", channel, info.name, info.group, info.circuit),
            None => println!("  {}  (not a recognized channel)", channel),
        }
    }

    println!();
    println!("Areas of definition:");
    let areas = areas_of_definition(chart.channels.iter().copied());
    for (i, area) in areas.iter().enumerate() {
        let names: Vec<&str> = area.iter().map(|center| center.name()).collect();
        println!("  {}: {}", i + 1, names.join(", "));
    }

    println!();
    print_activations("Personality", &chart.personality);
    print_activations("Design", &chart.design);

    println!();
    println!("Active gates:");
    for gate in &chart.active_gates {
        println!(
            "  {:>2}.{} {} ({:?})",
            gate.gate,
            gate.line,
            gate_name(gate.gate).unwrap_or("?"),
            gate.activation
        );
    }
}

fn print_activations(label: &str, activations: &Activations) {
    println!("{}:", label);
    for activation in activations.iter() {
        println!(
            "  {} {}: gate {} line {}",
            activation.planet.glyph(),
            activation.planet,
            activation.gate,
            activation.line
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() == 2 && args[1] == "health" {
        let client = Client::new();
        let body = health_check(&client, &api_url()).await?;
        println!("{}", body);
        return Ok(());
    }

    if args.len() != 4 {
        eprintln!("Usage: {} <YYYY-MM-DD> <HH:MM> <Birth location>", args[0]);
        eprintln!("       {} health", args[0]);
        eprintln!("Example: {} 1993-02-05 11:53 \"Manila, Philippines\"", args[0]);
        return Ok(());
    }

    let birth_date = NaiveDate::parse_from_str(&args[1], "%Y-%m-%d")
        .map_err(|e| format!("Error parsing birth date: {}", e))?;
    let birth_time = NaiveTime::parse_from_str(&args[2], "%H:%M")
        .map_err(|e| format!("Error parsing birth time: {}", e))?;
    let birth = BirthInfo {
        name: None,
        birth_date,
        birth_time,
        birth_location: args[3].clone(),
    };

    let client = Client::new();
    let api_chart = fetch_chart(&client, &api_url(), &api_token()?, &birth).await?;
    let chart = assemble_chart(birth, api_chart);
    print_chart(&chart);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bodygraph_core::{Center, Definition};

    fn sample_envelope() -> &'static str {
        r#"{
            "success": true,
            "data": {
                "birthInfo": {
                    "date": "1993-02-05",
                    "time": "11:53",
                    "location": "Manila, Philippines",
                    "coordinates": "14.5995, 120.9842",
                    "timezone": "Asia/Manila",
                    "locationSource": "geocoded"
                },
                "type": "Manifesting Generator",
                "strategy": "To Respond, then Inform",
                "authority": "Emotional",
                "signature": "Satisfaction",
                "notSelfTheme": "Frustration and Anger",
                "profile": "5/1",
                "profileName": "Heretic/Investigator",
                "incarnationCross": "Right Angle Cross of Rulership",
                "personality": {
                    "Sun": {"planet": "Sun", "gate": 49, "line": 5, "color": 1, "tone": 2, "base": 3},
                    "Earth": {"planet": "Earth", "gate": 4, "line": 5, "color": 1, "tone": 2, "base": 3},
                    "Rahu": {"planet": "Rahu", "gate": 22, "line": 4, "color": 2, "tone": 1, "base": 4},
                    "Ketu": {"planet": "Ketu", "gate": 47, "line": 4, "color": 2, "tone": 1, "base": 4},
                    "Moon": {"planet": "Moon", "gate": 8, "line": 2, "color": 1, "tone": 6, "base": 1},
                    "Mercury": {"planet": "Mercury", "gate": 60, "line": 6, "color": 3, "tone": 2, "base": 5},
                    "Venus": {"planet": "Venus", "gate": 19, "line": 3, "color": 4, "tone": 4, "base": 3},
                    "Mars": {"planet": "Mars", "gate": 63, "line": 5, "color": 6, "tone": 5, "base": 1},
                    "Jupiter": {"planet": "Jupiter", "gate": 3, "line": 2, "color": 2, "tone": 2, "base": 2},
                    "Saturn": {"planet": "Saturn", "gate": 26, "line": 1, "color": 1, "tone": 1, "base": 1},
                    "Uranus": {"planet": "Uranus", "gate": 27, "line": 4, "color": 3, "tone": 3, "base": 3},
                    "Neptune": {"planet": "Neptune", "gate": 55, "line": 6, "color": 5, "tone": 5, "base": 5},
                    "Pluto": {"planet": "Pluto", "gate": 49, "line": 3, "color": 4, "tone": 2, "base": 6}
                },
                "design": {
                    "Sun": {"planet": "Sun", "gate": 1, "line": 5, "color": 1, "tone": 2, "base": 3},
                    "Earth": {"planet": "Earth", "gate": 2, "line": 5, "color": 1, "tone": 2, "base": 3},
                    "Rahu": {"planet": "Rahu", "gate": 11, "line": 4, "color": 2, "tone": 1, "base": 4},
                    "Ketu": {"planet": "Ketu", "gate": 12, "line": 4, "color": 2, "tone": 1, "base": 4},
                    "Moon": {"planet": "Moon", "gate": 14, "line": 2, "color": 1, "tone": 6, "base": 1},
                    "Mercury": {"planet": "Mercury", "gate": 34, "line": 6, "color": 3, "tone": 2, "base": 5},
                    "Venus": {"planet": "Venus", "gate": 57, "line": 3, "color": 4, "tone": 4, "base": 3},
                    "Mars": {"planet": "Mars", "gate": 10, "line": 5, "color": 6, "tone": 5, "base": 1},
                    "Jupiter": {"planet": "Jupiter", "gate": 20, "line": 2, "color": 2, "tone": 2, "base": 2},
                    "Saturn": {"planet": "Saturn", "gate": 18, "line": 1, "color": 1, "tone": 1, "base": 1},
                    "Uranus": {"planet": "Uranus", "gate": 58, "line": 4, "color": 3, "tone": 3, "base": 3},
                    "Neptune": {"planet": "Neptune", "gate": 36, "line": 6, "color": 5, "tone": 5, "base": 5},
                    "Pluto": {"planet": "Pluto", "gate": 41, "line": 3, "color": 4, "tone": 2, "base": 6}
                },
                "channels": ["1-8", "34-57", "10-20", "18-58"],
                "definedCenters": ["g", "throat", "sacral", "spleen", "root"],
                "centers": {
                    "head": {"defined": false, "type": "pressure", "description": ""},
                    "g": {"defined": true, "type": "identity", "description": ""}
                },
                "version": "2.1.0"
            }
        }"#
    }

    fn sample_birth() -> BirthInfo {
        BirthInfo {
            name: None,
            birth_date: NaiveDate::from_ymd_opt(1993, 2, 5).unwrap(),
            birth_time: NaiveTime::from_hms_opt(11, 53, 0).unwrap(),
            birth_location: "Manila, Philippines".to_string(),
        }
    }

    #[test]
    fn test_envelope_parses_and_ignores_unused_fields() {
        let envelope: ApiEnvelope = serde_json::from_str(sample_envelope()).unwrap();
        assert!(envelope.success);
        let chart = envelope.data.unwrap();
        assert_eq!(chart.hd_type, HumanDesignType::ManifestingGenerator);
        assert_eq!(chart.authority, "Emotional");
        assert_eq!(chart.channels.len(), 4);
        assert_eq!(chart.personality.sun.gate, 49);
        assert_eq!(chart.design.sun.gate, 1);
    }

    #[test]
    fn test_error_envelope_has_no_data() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"success": false, "error": "Invalid location"}"#).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.error.as_deref(), Some("Invalid location"));
    }

    #[test]
    fn test_request_body_uses_service_field_names() {
        let request = CalcRequest {
            birth_date: "1993-02-05".to_string(),
            birth_time: "11:53".to_string(),
            birth_location: "Manila, Philippines".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["birthDate"], "1993-02-05");
        assert_eq!(json["birthTime"], "11:53");
        assert_eq!(json["birthLocation"], "Manila, Philippines");
    }

    #[test]
    fn test_assembled_chart_derives_definition_locally() {
        let envelope: ApiEnvelope = serde_json::from_str(sample_envelope()).unwrap();
        let chart = assemble_chart(sample_birth(), envelope.data.unwrap());

        // 1-8 and 10-20 define g/throat, 34-57 defines sacral/spleen and
        // 18-58 pulls in the root: two disjoint areas.
        assert_eq!(chart.definition, Definition::Split);
        assert_eq!(
            chart.defined_centers,
            vec![Center::Throat, Center::G, Center::Spleen, Center::Sacral, Center::Root]
        );
        assert_eq!(chart.open_centers.len(), 4);
        assert_eq!(chart.channels.len(), 4);
        assert!(!chart.active_gates.is_empty());
    }
}
