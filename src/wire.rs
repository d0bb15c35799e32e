use std::sync::Arc;
use std::time::Instant;

use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LinesCodec, LinesCodecError};

use crate::engine::{Engine, EngineError};
use crate::limits::MAX_LINE_LEN;
use crate::model::*;
use crate::observability;
use crate::property::{DEMO_PROPERTY, PropertyManager};

/// One query per line, JSON, tagged by `op`.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Switch this connection to another property.
    Use { property: String },
    Cell {
        room: String,
        day: Day,
    },
    Row {
        room: String,
        start: Day,
        end: Day,
    },
    Grid {
        #[serde(default)]
        search: String,
        #[serde(default)]
        group_by_floor: bool,
        start: Day,
        end: Day,
    },
    Rooms {
        #[serde(default)]
        search: String,
        #[serde(default)]
        group_by_floor: bool,
    },
    Days {
        start: Day,
        end: Day,
    },
    Legend,
}

fn ok_reply<T: serde::Serialize>(data: T) -> String {
    serde_json::json!({"ok": true, "data": data}).to_string()
}

fn error_reply(message: impl std::fmt::Display) -> String {
    serde_json::json!({"ok": false, "error": message.to_string()}).to_string()
}

fn reply_result<T: serde::Serialize>(result: Result<T, EngineError>) -> (String, bool) {
    match result {
        Ok(data) => (ok_reply(data), true),
        Err(e) => (error_reply(e), false),
    }
}

/// Serve one connection: read request lines, write one reply line each.
///
/// Bad requests and failed queries produce `{"ok":false,…}` replies and
/// keep the connection open; only I/O failures (or an oversized line) end
/// it. Connections start on the demo property until a `use` op switches.
pub async fn process_connection(
    socket: TcpStream,
    properties: Arc<PropertyManager>,
) -> Result<(), LinesCodecError> {
    let mut framed = Framed::new(socket, LinesCodec::new_with_max_length(MAX_LINE_LEN));

    let mut engine = match properties.get_or_create(DEMO_PROPERTY) {
        Ok(engine) => engine,
        Err(e) => {
            framed
                .send(error_reply(format!("property error: {e}")))
                .await?;
            return Ok(());
        }
    };

    while let Some(line) = framed.next().await {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = match serde_json::from_str::<Request>(&line) {
            Err(e) => {
                metrics::counter!(
                    observability::QUERIES_TOTAL,
                    "op" => "invalid",
                    "status" => "error"
                )
                .increment(1);
                error_reply(format!("bad request: {e}"))
            }
            Ok(req) => {
                let op = observability::op_label(&req);
                let started = Instant::now();
                let (reply, ok) = handle_request(&mut engine, &properties, req);
                let status = if ok { "ok" } else { "error" };
                metrics::histogram!(observability::QUERY_DURATION_SECONDS, "op" => op)
                    .record(started.elapsed().as_secs_f64());
                metrics::counter!(
                    observability::QUERIES_TOTAL,
                    "op" => op,
                    "status" => status
                )
                .increment(1);
                reply
            }
        };
        framed.send(reply).await?;
    }

    Ok(())
}

fn handle_request(
    engine: &mut Arc<Engine>,
    properties: &PropertyManager,
    req: Request,
) -> (String, bool) {
    match req {
        Request::Use { property } => match properties.get_or_create(&property) {
            Ok(next) => {
                *engine = next;
                (ok_reply(serde_json::json!({ "property": property })), true)
            }
            Err(e) => (error_reply(format!("property error: {e}")), false),
        },
        Request::Cell { room, day } => (ok_reply(engine.resolve_cell(&room, day)), true),
        Request::Row { room, start, end } => reply_result(
            DateWindow::new(start, end)
                .map_err(EngineError::from)
                .and_then(|w| engine.resolve_row(&room, &w)),
        ),
        Request::Grid {
            search,
            group_by_floor,
            start,
            end,
        } => reply_result(
            DateWindow::new(start, end)
                .map_err(EngineError::from)
                .and_then(|w| engine.resolve_grid(&search, group_by_floor, &w)),
        ),
        Request::Rooms {
            search,
            group_by_floor,
        } => reply_result(engine.room_view(&search, group_by_floor)),
        Request::Days { start, end } => reply_result(
            DateWindow::new(start, end)
                .map_err(EngineError::from)
                .and_then(|w| engine.date_columns(&w)),
        ),
        Request::Legend => (ok_reply(legend()), true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyManager;
    use std::path::PathBuf;

    fn d(day: u32) -> Day {
        Day::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn test_properties(name: &str) -> PropertyManager {
        let dir: PathBuf = std::env::temp_dir().join("roomgrid_test_wire").join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        PropertyManager::new(dir, d(1))
    }

    fn run(pm: &PropertyManager, line: &str) -> serde_json::Value {
        let mut engine = pm.get_or_create(DEMO_PROPERTY).unwrap();
        let req: Request = serde_json::from_str(line).unwrap();
        let (reply, _) = handle_request(&mut engine, pm, req);
        serde_json::from_str(&reply).unwrap()
    }

    #[test]
    fn request_parses_all_ops() {
        let lines = [
            r#"{"op":"use","property":"demo"}"#,
            r#"{"op":"cell","room":"101","day":"2026-03-02"}"#,
            r#"{"op":"row","room":"101","start":"2026-03-01","end":"2026-03-14"}"#,
            r#"{"op":"grid","search":"suite","group_by_floor":true,"start":"2026-03-01","end":"2026-03-14"}"#,
            r#"{"op":"rooms"}"#,
            r#"{"op":"days","start":"2026-03-01","end":"2026-03-02"}"#,
            r#"{"op":"legend"}"#,
        ];
        for line in lines {
            serde_json::from_str::<Request>(line).unwrap();
        }
    }

    #[test]
    fn rooms_defaults_are_empty_search_no_grouping() {
        let req: Request = serde_json::from_str(r#"{"op":"rooms"}"#).unwrap();
        match req {
            Request::Rooms {
                search,
                group_by_floor,
            } => {
                assert_eq!(search, "");
                assert!(!group_by_floor);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn unknown_op_rejected() {
        assert!(serde_json::from_str::<Request>(r#"{"op":"drop_table"}"#).is_err());
    }

    #[test]
    fn cell_reply_shape() {
        let pm = test_properties("cell");
        let reply = run(&pm, r#"{"op":"cell","room":"101","day":"2026-03-02"}"#);
        assert_eq!(reply["ok"], true);
        assert_eq!(reply["data"]["status"], "booked");
        assert_eq!(reply["data"]["booking"]["guest"], "Nguyen Van A");
    }

    #[test]
    fn backwards_window_is_error_reply() {
        let pm = test_properties("backwards");
        let reply = run(
            &pm,
            r#"{"op":"row","room":"101","start":"2026-03-10","end":"2026-03-01"}"#,
        );
        assert_eq!(reply["ok"], false);
        assert!(reply["error"].as_str().unwrap().contains("backwards window"));
    }

    #[test]
    fn legend_reply_has_five_rows() {
        let pm = test_properties("legend");
        let reply = run(&pm, r#"{"op":"legend"}"#);
        let rows = reply["data"].as_array().unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0]["status"], "available");
        assert_eq!(rows[1]["fill"], "#fde68a");
    }
}
