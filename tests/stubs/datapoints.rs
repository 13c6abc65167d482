#![allow(dead_code)]

pub const BOILER_TEMP: &str = r#"
{
    "project": "plant",
    "subsystem": "boiler",
    "name": "temp",
    "pollinterval": "five_minutes",
    "timeToLive": "b",
    "proc": {
        "unit": "°C",
        "scaling": "lin",
        "k": 2.0,
        "m": 1.0,
        "min": 0,
        "max": 100
    },
    "datasourcetype": "mqtt",
    "datasource": {
        "protocol": "mqtts",
        "address": "broker.example",
        "port": 8883,
        "topic": "sensors/1"
    }
}
"#;

pub const WEATHER_HUMIDITY: &str = r#"
{
    "project": "site",
    "subsystem": "weather",
    "name": "humidity",
    "proc": {"unit": "%", "k": 1},
    "datasourcetype": "web",
    "datasource": {
        "url": "https://api.example.com/weather",
        "authenticationType": "bearerToken",
        "auth": "secret",
        "format": "json",
        "valueExpression": "$.current.humidity",
        "timestampType": "epochSeconds",
        "timestampExpression": "$.current.dt"
    }
}
"#;

pub const FIELD_SOIL: &str = r#"
{
    "project": "farm",
    "subsystem": "field1",
    "name": "soil.moisture",
    "proc": {"scaling": "ktoF", "k": 1},
    "datasourcetype": "ttnv3",
    "datasource": {"zone": "eu1", "application": "soil", "device": "s-01"}
}
"#;

/// Keeps readings above 10 and reports them in tenths
pub const TANK_LEVEL: &str = r#"
{
    "project": "plant",
    "subsystem": "tank",
    "name": "level",
    "proc": {"unit": "m", "k": 1, "condition": "$ > 10", "scalefunc": "$ / 10"},
    "datasourcetype": "ttnv3",
    "datasource": {"zone": "eu1", "application": "tanks", "device": "t-01"}
}
"#;

/// Empty project, a name starting with a digit and inverted bounds
pub const BROKEN: &str = r#"
{
    "project": "",
    "subsystem": "boiler",
    "name": "1temp",
    "proc": {"min": 10, "max": 5},
    "datasourcetype": "ttnv3"
}
"#;

pub const UNKNOWN_SOURCE: &str = r#"
{
    "project": "plant",
    "subsystem": "boiler",
    "name": "temp",
    "datasourcetype": "kafka"
}
"#;

pub fn array(entries: &[&str]) -> String {
    format!("[{}]", entries.join(","))
}
