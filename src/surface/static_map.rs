use reqwest::Url;

use super::{MapView, MapsRuntime, OverlayStyle};
use crate::geom::Coordinate;

/// Image size requested from the imagery service.
const IMAGE_SIZE: &str = "640x400";

/// Build a static satellite image URL showing `path` over `view`.
///
/// The ring is closed explicitly and drawn with the overlay style's colours.
pub fn static_map_url(
    runtime: &MapsRuntime,
    view: &MapView,
    path: &[Coordinate],
    style: OverlayStyle,
) -> anyhow::Result<Url> {
    let hex = &style.color()[1..];
    let alpha = |opacity: f64| format!("{:02x}", (opacity * 255.0).round() as u8);

    let mut path_param = format!(
        "color:0x{hex}{}|weight:{}|fillcolor:0x{hex}{}",
        alpha(style.stroke_opacity()),
        style.stroke_weight(),
        alpha(style.fill_opacity()),
    );
    for p in path.iter().chain(path.first()) {
        path_param.push_str(&format!("|{:.7},{:.7}", p.latitude, p.longitude));
    }

    let center = format!("{:.7},{:.7}", view.center.latitude, view.center.longitude);
    let zoom = view.zoom.to_string();
    let mut params = vec![
        ("center", center.as_str()),
        ("zoom", zoom.as_str()),
        ("size", IMAGE_SIZE),
        ("maptype", view.map_type.as_str()),
    ];
    if path.len() >= 3 {
        params.push(("path", path_param.as_str()));
    }
    params.push(("key", runtime.api_key.as_str()));

    Ok(Url::parse_with_params(&runtime.static_maps_url, &params)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MapType;

    fn runtime() -> MapsRuntime {
        MapsRuntime {
            api_key: "k".into(),
            libraries: vec![],
            version: "weekly".into(),
            static_maps_url: "https://maps.example.com/staticmap".into(),
        }
    }

    #[test]
    fn url_carries_view_and_closed_path() {
        let view = MapView { center: Coordinate { latitude: 1.0, longitude: 2.0 }, zoom: 20, map_type: MapType::Satellite };
        let path = [
            Coordinate { latitude: 1.0, longitude: 2.0 },
            Coordinate { latitude: 1.0, longitude: 2.001 },
            Coordinate { latitude: 1.001, longitude: 2.001 },
        ];
        let url = static_map_url(&runtime(), &view, &path, OverlayStyle::Confirmed).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let get = |k: &str| pairs.iter().find(|(key, _)| key == k).map(|(_, v)| v.clone()).unwrap();

        assert_eq!(get("maptype"), "satellite");
        assert_eq!(get("zoom"), "20");
        let drawn = get("path");
        assert!(drawn.starts_with("color:0x10b981cc|weight:2|fillcolor:0x10b98159"));
        assert_eq!(drawn.matches('|').count(), 2 + 4);
        assert!(drawn.ends_with("|1.0000000,2.0000000"));
    }
}
