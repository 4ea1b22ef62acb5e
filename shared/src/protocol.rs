//! 与后端交换的请求体与响应体
//!
//! 后端对同一资源的响应形状并不统一（`{ user }` 或裸对象，`events`/`results`/数组），
//! 这里用 untagged 枚举接收，再归一化为单一形状。

use crate::{CityGuide, Event, LatLng, User};
use serde::{Deserialize, Serialize};

// =========================================================
// Request Bodies
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest;

/// 附近活动查询，坐标放在 query string 中
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearbyEventsRequest {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for NearbyEventsRequest {
    fn from(coords: LatLng) -> Self {
        Self {
            lat: coords.lat,
            lng: coords.lng,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyEventsRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEventRequest {
    pub id: String,
}

/// 新建活动，`date` 为 UTC ISO 字符串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CityGuideRequest {
    Coords { coords: LatLng },
    City { city: String },
}

// =========================================================
// Response Bodies
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurrentUserResponse {
    Wrapped { user: User },
    Bare(User),
}

impl From<CurrentUserResponse> for User {
    fn from(resp: CurrentUserResponse) -> Self {
        match resp {
            CurrentUserResponse::Wrapped { user } | CurrentUserResponse::Bare(user) => user,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventResponse {
    Wrapped { event: Event },
    Bare(Event),
}

impl From<EventResponse> for Event {
    fn from(resp: EventResponse) -> Self {
        match resp {
            EventResponse::Wrapped { event } | EventResponse::Bare(event) => event,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MyEventsResponse {
    #[serde(default)]
    pub events: Vec<Event>,
}

/// 附近活动响应：裸数组，或 `{ events | results, city? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NearbyEventsResponse {
    Bare(Vec<Event>),
    Wrapped {
        #[serde(default)]
        events: Option<Vec<Event>>,
        #[serde(default)]
        results: Option<Vec<Event>>,
        #[serde(default)]
        city: Option<String>,
    },
}

/// 归一化之后的附近活动
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NearbyEvents {
    pub events: Vec<Event>,
    pub city: Option<String>,
}

impl From<NearbyEventsResponse> for NearbyEvents {
    fn from(resp: NearbyEventsResponse) -> Self {
        match resp {
            NearbyEventsResponse::Bare(events) => Self { events, city: None },
            NearbyEventsResponse::Wrapped {
                events,
                results,
                city,
            } => Self {
                events: events.or(results).unwrap_or_default(),
                city: city.filter(|c| !c.trim().is_empty()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityGuideResponse {
    pub data: CityGuide,
}

/// 错误响应体，只关心 `message`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_current_user_shapes() {
        let wrapped: CurrentUserResponse =
            serde_json::from_value(json!({ "user": { "_id": "u1", "name": "Ada" } })).unwrap();
        let bare: CurrentUserResponse =
            serde_json::from_value(json!({ "_id": "u1", "name": "Ada" })).unwrap();
        assert_eq!(User::from(wrapped), User::from(bare));
    }

    #[test]
    fn test_virtual_id_does_not_break_envelopes() {
        let user: User = serde_json::from_value::<CurrentUserResponse>(json!({
            "user": { "_id": "u1", "id": "u1", "name": "Ada", "email": null }
        }))
        .unwrap()
        .into();
        assert_eq!(user.id, "u1");
        assert_eq!(user.email, "");

        let nearby: NearbyEvents = serde_json::from_value::<NearbyEventsResponse>(json!({
            "events": [
                { "_id": "a", "id": "a", "title": null },
                { "_id": "b", "title": "Jazz" }
            ]
        }))
        .unwrap()
        .into();
        assert_eq!(nearby.events.len(), 2);
        assert_eq!(nearby.events[0].title, "");
    }

    #[test]
    fn test_nearby_events_prefers_events_then_results() {
        let events: NearbyEvents = serde_json::from_value::<NearbyEventsResponse>(json!({
            "events": [{ "_id": "a" }],
            "results": [{ "_id": "b" }],
            "city": "Berlin"
        }))
        .unwrap()
        .into();
        assert_eq!(events.events[0].id, "a");
        assert_eq!(events.city.as_deref(), Some("Berlin"));

        let results: NearbyEvents =
            serde_json::from_value::<NearbyEventsResponse>(json!({ "results": [{ "_id": "b" }] }))
                .unwrap()
                .into();
        assert_eq!(results.events[0].id, "b");
        assert_eq!(results.city, None);

        let bare: NearbyEvents =
            serde_json::from_value::<NearbyEventsResponse>(json!([{ "_id": "c" }]))
                .unwrap()
                .into();
        assert_eq!(bare.events[0].id, "c");
    }

    #[test]
    fn test_city_guide_request_bodies() {
        let by_coords = CityGuideRequest::Coords {
            coords: LatLng { lat: 48.85, lng: 2.35 },
        };
        assert_eq!(
            serde_json::to_value(&by_coords).unwrap(),
            json!({ "coords": { "lat": 48.85, "lng": 2.35 } })
        );

        let by_city = CityGuideRequest::City {
            city: "Paris".into(),
        };
        assert_eq!(serde_json::to_value(&by_city).unwrap(), json!({ "city": "Paris" }));
    }
}
