use crate::{StoreError, StoreResult};
use rusqlite::{params, Connection, Transaction};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use trellis_schema::{EntityType, Registry};
use trellis_shape::{PlanOp, WritePlan};
use trellis_types::{Row, RowId};

/// Persistent store for entity rows and relation links, backed by SQLite.
pub struct EntityStore {
    conn: Arc<Mutex<Connection>>,
}

impl EntityStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS entities (
                id TEXT PRIMARY KEY,
                entity_type TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS links (
                parent_id TEXT NOT NULL,
                relation TEXT NOT NULL,
                child_id TEXT NOT NULL,
                position INTEGER NOT NULL DEFAULT 0,
                UNIQUE(parent_id, relation, child_id)
            );

            CREATE INDEX IF NOT EXISTS idx_entities_type ON entities(entity_type);
            CREATE INDEX IF NOT EXISTS idx_links_parent ON links(parent_id, relation);
            CREATE INDEX IF NOT EXISTS idx_links_child ON links(child_id);
            ",
        )?;
        Ok(())
    }

    // ── Plan execution ───────────────────────────────────────────

    /// Executes a whole nested write plan inside one transaction.
    ///
    /// Connect targets are validated to exist; any failure at any depth
    /// rolls the entire plan back. Returns the root row id.
    pub fn execute(&self, registry: &Registry, plan: &WritePlan) -> StoreResult<RowId> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        apply_plan(&tx, registry, plan, None)?;
        tx.commit()?;
        info!(entity = %plan.entity_type, id = %plan.id, nodes = plan.node_count(), "committed write plan");
        Ok(plan.id)
    }

    // ── Row access ───────────────────────────────────────────────

    /// Fetches a row by id.
    pub fn fetch(&self, id: &RowId) -> StoreResult<Row> {
        let conn = self.conn.lock().unwrap();
        fetch_row(&conn, id)
    }

    /// Counts rows of one entity type, for quota checks.
    pub fn count(&self, entity_type: EntityType) -> StoreResult<u64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM entities WHERE entity_type = ?1",
            params![entity_type.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Fetches the rows linked under a parent's relation, in link order.
    pub fn children(&self, parent: &RowId, relation: &str) -> StoreResult<Vec<Row>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT child_id FROM links WHERE parent_id = ?1 AND relation = ?2 ORDER BY position",
        )?;
        let ids: Vec<String> = stmt
            .query_map(params![parent.to_string(), relation], |row| row.get(0))?
            .collect::<Result<_, _>>()?;

        let mut rows = Vec::with_capacity(ids.len());
        for id_str in ids {
            let id = parse_row_id(&id_str)?;
            rows.push(fetch_row(&conn, &id)?);
        }
        Ok(rows)
    }

    /// Counts the rows linked under a parent's relation, for count fields.
    pub fn count_children(&self, parent: &RowId, relation: &str) -> StoreResult<u64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM links WHERE parent_id = ?1 AND relation = ?2",
            params![parent.to_string(), relation],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

fn apply_plan(
    tx: &Transaction<'_>,
    registry: &Registry,
    plan: &WritePlan,
    parent: Option<(&WritePlan, &str)>,
) -> StoreResult<()> {
    let now = now_millis();
    match plan.op {
        PlanOp::Create => {
            let mut data = plan.scalars.clone();
            if let Some((parent_plan, _)) = parent {
                back_reference_field(registry, plan, parent_plan, &mut data);
            }
            tx.execute(
                "INSERT INTO entities (id, entity_type, data, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    plan.id.to_string(),
                    plan.entity_type.as_str(),
                    serde_json::to_string(&Value::Object(data))?,
                    now,
                    now,
                ],
            )?;
            debug!(entity = %plan.entity_type, id = %plan.id, "created row");
        }
        PlanOp::Update => {
            let existing = fetch_row(tx, &plan.id)?;
            ensure_type(&existing, plan.entity_type)?;
            let mut data = existing
                .data
                .as_object()
                .cloned()
                .unwrap_or_default();
            for (key, value) in &plan.scalars {
                data.insert(key.clone(), value.clone());
            }
            tx.execute(
                "UPDATE entities SET data = ?2, updated_at = ?3 WHERE id = ?1",
                params![
                    plan.id.to_string(),
                    serde_json::to_string(&Value::Object(data))?,
                    now,
                ],
            )?;
            debug!(entity = %plan.entity_type, id = %plan.id, "updated row");
        }
    }

    for rel in &plan.relations {
        for (position, child) in rel.creates.iter().enumerate() {
            apply_plan(tx, registry, child, Some((plan, rel.relation.as_str())))?;
            link(tx, &plan.id, &rel.relation, &child.id, position as i64)?;
        }
        for child in &rel.updates {
            apply_plan(tx, registry, child, Some((plan, rel.relation.as_str())))?;
        }
        for (position, target) in rel.connect.iter().enumerate() {
            // Connect targets must already exist and be of the relation's
            // target type.
            let row = fetch_row(tx, target)?;
            ensure_type(&row, rel.target)?;
            link(tx, &plan.id, &rel.relation, target, position as i64)?;
        }
        for target in &rel.deletes {
            delete_row(tx, registry, target, rel.target)?;
        }
        for target in &rel.disconnects {
            tx.execute(
                "DELETE FROM links WHERE parent_id = ?1 AND relation = ?2 AND child_id = ?3",
                params![plan.id.to_string(), rel.relation, target.to_string()],
            )?;
        }
    }
    Ok(())
}

/// Fills the child's delegation back-reference field from the parent plan,
/// so ownership resolution can walk upward from the stored row.
fn back_reference_field(
    registry: &Registry,
    child: &WritePlan,
    parent: &WritePlan,
    data: &mut Map<String, Value>,
) {
    let descriptor = registry.describe(child.entity_type);
    if let Some(delegation) = descriptor.delegates_to {
        if delegation.parent == parent.entity_type {
            let field = delegation.parent_field.trim_start_matches('/');
            data.insert(field.to_string(), Value::String(parent.id.to_string()));
        }
    }
}

/// Deletes a row after checking it is of the expected type, cascading into
/// children whose type delegates ownership to it. Connected rows of other
/// types (tags, participants) only lose their links.
fn delete_row(
    tx: &Transaction<'_>,
    registry: &Registry,
    id: &RowId,
    expected: EntityType,
) -> StoreResult<()> {
    let row = fetch_row(tx, id)?;
    ensure_type(&row, expected)?;

    let descriptor = registry.describe(expected);
    for rel in &descriptor.relations {
        let delegates_here = registry
            .describe(rel.target)
            .delegates_to
            .is_some_and(|d| d.parent == expected);
        if delegates_here {
            for child in child_ids(tx, id, rel.name)? {
                delete_row(tx, registry, &child, rel.target)?;
            }
        }
    }

    tx.execute(
        "DELETE FROM links WHERE parent_id = ?1 OR child_id = ?1",
        params![id.to_string()],
    )?;
    tx.execute("DELETE FROM entities WHERE id = ?1", params![id.to_string()])?;
    debug!(entity = %expected, %id, "deleted row");
    Ok(())
}

fn ensure_type(row: &Row, expected: EntityType) -> StoreResult<()> {
    if row.entity_type != expected.as_str() {
        return Err(StoreError::WrongEntityType {
            id: row.id,
            expected,
            actual: row.entity_type.clone(),
        });
    }
    Ok(())
}

fn child_ids(tx: &Transaction<'_>, parent: &RowId, relation: &str) -> StoreResult<Vec<RowId>> {
    let mut stmt = tx.prepare(
        "SELECT child_id FROM links WHERE parent_id = ?1 AND relation = ?2 ORDER BY position",
    )?;
    let ids: Vec<String> = stmt
        .query_map(params![parent.to_string(), relation], |row| row.get(0))?
        .collect::<Result<_, _>>()?;
    ids.iter().map(|s| parse_row_id(s)).collect()
}

fn link(
    tx: &Transaction<'_>,
    parent: &RowId,
    relation: &str,
    child: &RowId,
    position: i64,
) -> StoreResult<()> {
    tx.execute(
        "INSERT OR REPLACE INTO links (parent_id, relation, child_id, position)
         VALUES (?1, ?2, ?3, ?4)",
        params![parent.to_string(), relation, child.to_string(), position],
    )?;
    Ok(())
}

fn fetch_row(conn: &Connection, id: &RowId) -> StoreResult<Row> {
    let result = conn.query_row(
        "SELECT entity_type, data, created_at, updated_at FROM entities WHERE id = ?1",
        params![id.to_string()],
        |row| {
            let entity_type: String = row.get(0)?;
            let data: String = row.get(1)?;
            let created_at: i64 = row.get(2)?;
            let updated_at: i64 = row.get(3)?;
            Ok((entity_type, data, created_at, updated_at))
        },
    );
    match result {
        Ok((entity_type, data, created_at, updated_at)) => Ok(Row {
            id: *id,
            entity_type,
            data: serde_json::from_str(&data)?,
            created_at,
            updated_at,
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound(*id)),
        Err(e) => Err(e.into()),
    }
}

fn parse_row_id(s: &str) -> StoreResult<RowId> {
    RowId::parse(s).map_err(|_| StoreError::Database(rusqlite::Error::InvalidQuery))
}

fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
