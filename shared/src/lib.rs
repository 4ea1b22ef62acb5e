use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;

pub use chrono;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中乐观认证标记的键
pub const AUTH_FLAG_KEY: &str = "auth";
/// 认证标记的取值
pub const AUTH_FLAG_VALUE: &str = "1";
/// 应用内广播认证变化的事件名
pub const AUTH_CHANGE_EVENT: &str = "authchange";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 已认证用户，由后端持有，客户端只缓存一份副本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "record::UserRecord")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// 组织者引用：可能只是一个 id，也可能是后端 populate 之后的对象
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrganizerRef {
    Id(String),
    Populated(Organizer),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "record::OrganizerRecord")]
pub struct Organizer {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: Option<String>,
}

impl OrganizerRef {
    pub fn id(&self) -> &str {
        match self {
            OrganizerRef::Id(id) => id,
            OrganizerRef::Populated(o) => &o.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            OrganizerRef::Id(_) => None,
            OrganizerRef::Populated(o) => o.name.as_deref(),
        }
    }
}

/// GeoJSON 点
///
/// 注意坐标顺序为 `[longitude, latitude]`，与平铺的 `latitude`/`longitude` 字段相反。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl GeoPoint {
    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.first().copied()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.get(1).copied()
    }
}

/// 经纬度坐标（AI 导览请求体使用 `{ lat, lng }` 形式）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "record::EventRecord")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub geo: Option<GeoPoint>,
    /// ISO 8601 字符串，保持原样，排序和展示时再解析
    pub date: Option<String>,
    pub organizer: Option<OrganizerRef>,
    #[serde(rename = "organizerName")]
    pub organizer_name: Option<String>,
}

impl Event {
    pub fn organizer_id(&self) -> Option<&str> {
        self.organizer.as_ref().map(OrganizerRef::id)
    }

    /// 展示用的组织者名称：优先 populate 的对象，其次后端预先整理好的 `organizerName`
    pub fn organizer_display_name(&self) -> Option<&str> {
        self.organizer
            .as_ref()
            .and_then(OrganizerRef::name)
            .or(self.organizer_name.as_deref())
    }

    /// 按身份比较判断 `user_id` 是否为组织者
    pub fn is_organized_by(&self, user_id: &str) -> bool {
        !user_id.is_empty() && self.organizer_id() == Some(user_id)
    }
}

// =========================================================
// 线上记录 (Wire Records)
// =========================================================

/// 后端记录的宽松形状
///
/// 同一条记录可能同时带 `_id` 和 `id`（以 `_id` 为准），字符串字段也可能是 `null`。
mod record {
    use super::{Event, GeoPoint, Organizer, OrganizerRef, User};
    use serde::Deserialize;

    fn pick_id(mongo: Option<String>, plain: Option<String>) -> Result<String, String> {
        mongo
            .or(plain)
            .ok_or_else(|| "missing field `_id`".to_string())
    }

    #[derive(Deserialize)]
    pub struct UserRecord {
        #[serde(default, rename = "_id")]
        mongo_id: Option<String>,
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        email: Option<String>,
    }

    impl TryFrom<UserRecord> for User {
        type Error = String;

        fn try_from(r: UserRecord) -> Result<Self, Self::Error> {
            Ok(User {
                id: pick_id(r.mongo_id, r.id)?,
                name: r.name.unwrap_or_default(),
                email: r.email.unwrap_or_default(),
            })
        }
    }

    #[derive(Deserialize)]
    pub struct OrganizerRecord {
        #[serde(default, rename = "_id")]
        mongo_id: Option<String>,
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
    }

    impl TryFrom<OrganizerRecord> for Organizer {
        type Error = String;

        fn try_from(r: OrganizerRecord) -> Result<Self, Self::Error> {
            Ok(Organizer {
                id: pick_id(r.mongo_id, r.id)?,
                name: r.name,
            })
        }
    }

    #[derive(Deserialize)]
    pub struct EventRecord {
        #[serde(default, rename = "_id")]
        mongo_id: Option<String>,
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        location: Option<String>,
        #[serde(default)]
        latitude: Option<f64>,
        #[serde(default)]
        longitude: Option<f64>,
        #[serde(default)]
        geo: Option<GeoPoint>,
        #[serde(default)]
        date: Option<String>,
        #[serde(default)]
        organizer: Option<OrganizerRef>,
        #[serde(default, rename = "organizerName")]
        organizer_name: Option<String>,
    }

    impl TryFrom<EventRecord> for Event {
        type Error = String;

        fn try_from(r: EventRecord) -> Result<Self, Self::Error> {
            Ok(Event {
                id: pick_id(r.mongo_id, r.id)?,
                title: r.title.unwrap_or_default(),
                description: r.description,
                location: r.location,
                latitude: r.latitude,
                longitude: r.longitude,
                geo: r.geo,
                date: r.date,
                organizer: r.organizer,
                organizer_name: r.organizer_name,
            })
        }
    }
}

// =========================================================
// AI 城市导览 (City Guide)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityGuide {
    pub city: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub sections: GuideSections,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideSections {
    #[serde(default)]
    pub history_monuments: Vec<GuideItem>,
    #[serde(default)]
    pub clubs_bars: Vec<GuideItem>,
    #[serde(default)]
    pub parks_nature: Vec<GuideItem>,
    #[serde(default)]
    pub shopping: Vec<GuideItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideItem {
    pub name: String,
    #[serde(default)]
    pub neighborhood: Option<String>,
    /// 推荐理由
    #[serde(default)]
    pub why: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuideCategory {
    HistoryMonuments,
    ClubsBars,
    ParksNature,
    Shopping,
}

impl GuideCategory {
    /// 页面上的展示顺序
    pub const ALL: [GuideCategory; 4] = [
        GuideCategory::HistoryMonuments,
        GuideCategory::ClubsBars,
        GuideCategory::ParksNature,
        GuideCategory::Shopping,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            GuideCategory::HistoryMonuments => "History & Monuments",
            GuideCategory::ClubsBars => "Clubs & Bars",
            GuideCategory::ParksNature => "Parks & Nature",
            GuideCategory::Shopping => "Shopping",
        }
    }
}

impl GuideSections {
    pub fn items(&self, category: GuideCategory) -> &[GuideItem] {
        match category {
            GuideCategory::HistoryMonuments => &self.history_monuments,
            GuideCategory::ClubsBars => &self.clubs_bars,
            GuideCategory::ParksNature => &self.parks_nature,
            GuideCategory::Shopping => &self.shopping,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (GuideCategory, &[GuideItem])> {
        GuideCategory::ALL.into_iter().map(|c| (c, self.items(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_accepts_mongo_ids_and_populated_organizer() {
        let event: Event = serde_json::from_value(json!({
            "_id": "e1",
            "title": "Jazz Night",
            "organizer": { "_id": "u1", "name": "Ada" },
            "geo": { "type": "Point", "coordinates": [13.40, 52.52] }
        }))
        .unwrap();

        assert_eq!(event.id, "e1");
        assert_eq!(event.organizer_id(), Some("u1"));
        assert_eq!(event.organizer_display_name(), Some("Ada"));
        assert!(event.is_organized_by("u1"));
        assert!(!event.is_organized_by("u2"));

        let geo = event.geo.unwrap();
        assert_eq!(geo.longitude(), Some(13.40));
        assert_eq!(geo.latitude(), Some(52.52));
    }

    #[test]
    fn test_event_with_bare_organizer_id() {
        let event: Event = serde_json::from_value(json!({
            "id": "e2",
            "title": "Meetup",
            "organizer": "u9",
            "organizerName": "Grace"
        }))
        .unwrap();

        assert_eq!(event.organizer_id(), Some("u9"));
        assert_eq!(event.organizer_display_name(), Some("Grace"));
    }

    #[test]
    fn test_empty_user_id_never_matches() {
        let event: Event = serde_json::from_value(json!({ "_id": "e3", "organizer": "" })).unwrap();
        assert!(!event.is_organized_by(""));
    }

    #[test]
    fn test_records_with_both_ids_prefer_mongo_id() {
        let event: Event = serde_json::from_value(json!({
            "_id": "e4",
            "id": "e4",
            "title": null,
            "description": null,
            "organizer": { "_id": "u1", "id": "u1", "name": null }
        }))
        .unwrap();

        assert_eq!(event.id, "e4");
        assert_eq!(event.title, "");
        assert_eq!(event.organizer_id(), Some("u1"));
        assert_eq!(event.organizer_display_name(), None);

        let user: User =
            serde_json::from_value(json!({ "_id": "u1", "id": "other", "name": null })).unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.name, "");
    }

    #[test]
    fn test_record_without_any_id_is_rejected() {
        let err = serde_json::from_value::<Event>(json!({ "title": "Orphan" })).unwrap_err();
        assert!(err.to_string().contains("_id"));
    }

    #[test]
    fn test_event_serializes_with_mongo_id() {
        let event: Event = serde_json::from_value(json!({ "id": "e5", "title": "Gig" })).unwrap();
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["_id"], "e5");
        assert_eq!(value["title"], "Gig");
    }

    #[test]
    fn test_guide_sections_keep_display_order() {
        let guide: CityGuide = serde_json::from_value(json!({
            "city": "Paris",
            "summary": "Lights",
            "sections": {
                "historyMonuments": [{ "name": "Louvre", "why": "Art" }],
                "shopping": [{ "name": "Le Marais", "neighborhood": "3e", "why": "Boutiques" }]
            }
        }))
        .unwrap();

        let titles: Vec<_> = guide.sections.iter().map(|(c, _)| c.title()).collect();
        assert_eq!(
            titles,
            ["History & Monuments", "Clubs & Bars", "Parks & Nature", "Shopping"]
        );
        assert!(guide.sections.items(GuideCategory::ClubsBars).is_empty());
        assert_eq!(
            guide.sections.items(GuideCategory::Shopping)[0].neighborhood.as_deref(),
            Some("3e")
        );
    }
}
