use std::{
    collections::{HashMap, HashSet, VecDeque},
    path::Path,
    sync::Arc,
};

use redb::{Database, ReadableTable, Table, TableDefinition};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::{
    create_task_request::CreateTaskRequest, data_error::DataError, task::Task,
    update_task_request::UpdateTaskRequest, user::User,
};

const USERS_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("users");
const USERNAME_INDEX: TableDefinition<&str, &[u8]> = TableDefinition::new("username_index");
const EMAIL_INDEX: TableDefinition<&str, &[u8]> = TableDefinition::new("email_index");
const TASKS_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("tasks");

/// Done/total counts over one owner's tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionSummary {
    pub total: usize,
    pub done: usize,
}

impl CompletionSummary {
    /// 0.0 for an owner without tasks.
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}

/// Handle to the redb file. Cloneable (Arc inside).
///
/// Every task operation takes the caller's id and only ever sees that
/// owner's rows. Each mutation is a single write transaction.
#[derive(Clone)]
pub struct DataContext {
    db: Arc<Database>,
}

impl DataContext {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let db = Database::create(path)?;
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS_TABLE)?;
            let _ = write_txn.open_table(USERNAME_INDEX)?;
            let _ = write_txn.open_table(EMAIL_INDEX)?;
            let _ = write_txn.open_table(TASKS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(DataContext { db: Arc::new(db) })
    }

    // USERS
    pub fn create_user(&self, user: &User) -> Result<(), DataError> {
        let email_key = user.email.to_lowercase();
        let write_txn = self.db.begin_write()?;
        {
            let mut users_table = write_txn.open_table(USERS_TABLE)?;
            let mut username_index = write_txn.open_table(USERNAME_INDEX)?;
            let mut email_index = write_txn.open_table(EMAIL_INDEX)?;

            if username_index.get(user.username.as_str())?.is_some() {
                return Err(DataError::Conflict("Username already taken".to_string()));
            }
            if email_index.get(email_key.as_str())?.is_some() {
                return Err(DataError::Conflict("Email already registered".to_string()));
            }

            let user_bytes = encode(user)?;
            let id_bytes = user.id.as_bytes();
            users_table.insert(id_bytes.as_slice(), user_bytes.as_slice())?;
            username_index.insert(user.username.as_str(), id_bytes.as_slice())?;
            email_index.insert(email_key.as_str(), id_bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn get_user(&self, id: Uuid) -> Result<Option<User>, DataError> {
        let read_txn = self.db.begin_read()?;
        let users_table = read_txn.open_table(USERS_TABLE)?;
        match users_table.get(id.as_bytes().as_slice())? {
            Some(data) => Ok(Some(decode(data.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DataError> {
        let read_txn = self.db.begin_read()?;
        let username_index = read_txn.open_table(USERNAME_INDEX)?;

        match username_index.get(username)? {
            Some(id_data) => {
                let users_table = read_txn.open_table(USERS_TABLE)?;
                match users_table.get(id_data.value())? {
                    Some(user_data) => Ok(Some(decode(user_data.value())?)),
                    None => Ok(None),
                }
            }
            None => Ok(None),
        }
    }

    // TASKS
    /// Build a task from the request, let `enrich` fill derived fields, and
    /// persist it, all in one transaction.
    pub fn create_task(
        &self,
        request: CreateTaskRequest,
        owner_id: Uuid,
        enrich: impl FnOnce(&mut Task),
    ) -> Result<Task, DataError> {
        let mut task = Task::new(request, owner_id);
        enrich(&mut task);

        let write_txn = self.db.begin_write()?;
        {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            if let Some(parent_id) = task.parent_task_id {
                validate_parent(&tasks_table, owner_id, task.id, parent_id)?;
            }
            write_task(&mut tasks_table, &task)?;
        }
        write_txn.commit()?;
        Ok(task)
    }

    pub fn get_task(&self, id: Uuid, owner_id: Uuid) -> Result<Task, DataError> {
        let read_txn = self.db.begin_read()?;
        let tasks_table = read_txn.open_table(TASKS_TABLE)?;
        owned(read_task(&tasks_table, id)?, owner_id)
    }

    /// Newest first.
    pub fn list_tasks(&self, owner_id: Uuid) -> Result<Vec<Task>, DataError> {
        let read_txn = self.db.begin_read()?;
        let tasks_table = read_txn.open_table(TASKS_TABLE)?;

        let mut tasks = owner_tasks(&tasks_table, owner_id)?;
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(tasks)
    }

    pub fn update_task(
        &self,
        id: Uuid,
        owner_id: Uuid,
        request: UpdateTaskRequest,
    ) -> Result<Task, DataError> {
        let write_txn = self.db.begin_write()?;
        let task = {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            let mut task = owned(read_task(&tasks_table, id)?, owner_id)?;
            if let Some(parent_id) = request.parent_task_id.as_set() {
                validate_parent(&tasks_table, owner_id, id, *parent_id)?;
            }
            task.edit(request);
            write_task(&mut tasks_table, &task)?;
            task
        };
        write_txn.commit()?;
        Ok(task)
    }

    pub fn record_estimate(
        &self,
        id: Uuid,
        owner_id: Uuid,
        minutes: u32,
        confidence: f64,
    ) -> Result<Task, DataError> {
        let write_txn = self.db.begin_write()?;
        let task = {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            let mut task = owned(read_task(&tasks_table, id)?, owner_id)?;
            task.record_estimate(minutes, confidence);
            write_task(&mut tasks_table, &task)?;
            task
        };
        write_txn.commit()?;
        Ok(task)
    }

    /// Delete a task and every descendant. Returns the removed ids, deepest
    /// first, with `id` itself last.
    pub fn delete_task(&self, id: Uuid, owner_id: Uuid) -> Result<Vec<Uuid>, DataError> {
        let write_txn = self.db.begin_write()?;
        let doomed = {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            owned(read_task(&tasks_table, id)?, owner_id)?;

            let siblings = owner_tasks(&tasks_table, owner_id)?;
            let doomed = subtree(id, &siblings);
            for task_id in &doomed {
                tasks_table.remove(task_id.as_bytes().as_slice())?;
            }
            doomed
        };
        write_txn.commit()?;
        Ok(doomed)
    }

    pub fn completion_summary(&self, owner_id: Uuid) -> Result<CompletionSummary, DataError> {
        let read_txn = self.db.begin_read()?;
        let tasks_table = read_txn.open_table(TASKS_TABLE)?;
        let tasks = owner_tasks(&tasks_table, owner_id)?;
        Ok(CompletionSummary {
            total: tasks.len(),
            done: tasks.iter().filter(|t| t.is_done()).count(),
        })
    }

    pub fn completion_rate(&self, owner_id: Uuid) -> Result<f64, DataError> {
        Ok(self.completion_summary(owner_id)?.rate())
    }

    pub fn count_tasks(&self, owner_id: Uuid) -> Result<usize, DataError> {
        Ok(self.completion_summary(owner_id)?.total)
    }
}

// ── Table helpers ──────────────────────────────────────────────

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, DataError> {
    postcard::to_allocvec(value).map_err(|e| DataError::Encode(e.to_string()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DataError> {
    postcard::from_bytes(bytes).map_err(|e| DataError::Decode(e.to_string()))
}

fn read_task(
    table: &impl ReadableTable<&'static [u8], &'static [u8]>,
    id: Uuid,
) -> Result<Option<Task>, DataError> {
    match table.get(id.as_bytes().as_slice())? {
        Some(data) => Ok(Some(decode(data.value())?)),
        None => Ok(None),
    }
}

fn write_task(
    table: &mut Table<'_, &'static [u8], &'static [u8]>,
    task: &Task,
) -> Result<(), DataError> {
    let task_bytes = encode(task)?;
    table.insert(task.id.as_bytes().as_slice(), task_bytes.as_slice())?;
    Ok(())
}

/// Foreign tasks are reported exactly like missing ones.
fn owned(task: Option<Task>, owner_id: Uuid) -> Result<Task, DataError> {
    task.filter(|t| t.owner_id == owner_id)
        .ok_or(DataError::NotFound("Task"))
}

fn owner_tasks(
    table: &impl ReadableTable<&'static [u8], &'static [u8]>,
    owner_id: Uuid,
) -> Result<Vec<Task>, DataError> {
    let mut tasks = Vec::new();
    for entry in table.iter()? {
        let (_, value) = entry?;
        let task: Task = decode(value.value())?;
        if task.owner_id == owner_id {
            tasks.push(task);
        }
    }
    Ok(tasks)
}

/// Reject a parent that is missing, foreign, the task itself, or one of its
/// descendants.
fn validate_parent(
    table: &impl ReadableTable<&'static [u8], &'static [u8]>,
    owner_id: Uuid,
    task_id: Uuid,
    parent_id: Uuid,
) -> Result<(), DataError> {
    if parent_id == task_id {
        return Err(DataError::Invalid("a task cannot be its own parent".to_string()));
    }

    let mut seen = HashSet::new();
    let mut cursor = Some(parent_id);
    while let Some(current) = cursor {
        if current == task_id {
            return Err(DataError::Invalid("parent_task_id would create a cycle".to_string()));
        }
        if !seen.insert(current) {
            break;
        }
        match read_task(table, current)?.filter(|t| t.owner_id == owner_id) {
            Some(ancestor) => cursor = ancestor.parent_task_id,
            None if current == parent_id => {
                return Err(DataError::Invalid("parent task not found".to_string()));
            }
            None => break,
        }
    }
    Ok(())
}

/// `root` plus all transitive children, deepest first.
fn subtree(root: Uuid, tasks: &[Task]) -> Vec<Uuid> {
    let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for task in tasks {
        if let Some(parent_id) = task.parent_task_id {
            children.entry(parent_id).or_default().push(task.id);
        }
    }

    let mut seen = HashSet::from([root]);
    let mut order = vec![root];
    let mut queue = VecDeque::from([root]);
    while let Some(current) = queue.pop_front() {
        for child in children.get(&current).into_iter().flatten() {
            if seen.insert(*child) {
                order.push(*child);
                queue.push_back(*child);
            }
        }
    }
    order.reverse();
    order
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{patch::Patch, signup_request::SignupRequest, task_status::TaskStatus};
    use std::{fs, path::PathBuf, thread, time::Duration};

    /// Temp database file that cleans up after itself.
    struct TempDb {
        ctx: DataContext,
        path: PathBuf,
    }

    impl Drop for TempDb {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.path);
        }
    }

    fn temp_db(name: &str) -> TempDb {
        let file = format!("taskpilot_test_{name}_{}.redb", std::process::id());
        let path = std::env::temp_dir().join(file);
        let _ = fs::remove_file(&path);
        let ctx = DataContext::new(&path).unwrap();
        TempDb { ctx, path }
    }

    fn request(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.into(),
            ..Default::default()
        }
    }

    fn child_of(title: &str, parent: Uuid) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.into(),
            parent_task_id: Some(parent),
            ..Default::default()
        }
    }

    fn create(ctx: &DataContext, req: CreateTaskRequest, owner: Uuid) -> Task {
        ctx.create_task(req, owner, |_| {}).unwrap()
    }

    fn user(username: &str, email: &str) -> User {
        User::new(
            SignupRequest {
                username: username.into(),
                email: email.into(),
                password: "irrelevant".into(),
                full_name: None,
            },
            "hash".into(),
        )
    }

    #[test]
    fn create_applies_enrichment_and_survives_reopen() {
        let file = format!("taskpilot_test_reopen_{}.redb", std::process::id());
        let path = std::env::temp_dir().join(file);
        let _ = fs::remove_file(&path);
        let owner = Uuid::new_v4();

        let task = {
            let ctx = DataContext::new(&path).unwrap();
            ctx.create_task(
                CreateTaskRequest {
                    title: "Plan sprint".into(),
                    tags: vec!["work".into(), "planning".into()],
                    ..Default::default()
                },
                owner,
                |t| t.estimated_minutes = 74,
            )
            .unwrap()
        };

        // Reboot: the row should come back byte-for-byte.
        let ctx = DataContext::new(&path).unwrap();
        let fetched = ctx.get_task(task.id, owner).unwrap();
        assert_eq!(fetched, task);
        assert_eq!(fetched.estimated_minutes, 74);
        assert_eq!(fetched.tags, vec!["work".to_string(), "planning".to_string()]);

        drop(ctx);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn list_is_owner_scoped_and_newest_first() {
        let db = temp_db("list");
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let first = create(&db.ctx, request("first"), alice);
        thread::sleep(Duration::from_millis(2));
        let second = create(&db.ctx, request("second"), alice);
        create(&db.ctx, request("bob's"), bob);

        let tasks = db.ctx.list_tasks(alice).unwrap();
        let ids: Vec<Uuid> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn foreign_tasks_look_missing() {
        let db = temp_db("foreign");
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let task = create(&db.ctx, request("private"), alice);

        assert!(matches!(db.ctx.get_task(task.id, bob), Err(DataError::NotFound(_))));
        assert!(matches!(
            db.ctx.update_task(task.id, bob, UpdateTaskRequest::default()),
            Err(DataError::NotFound(_))
        ));
        assert!(matches!(db.ctx.delete_task(task.id, bob), Err(DataError::NotFound(_))));
        assert!(matches!(db.ctx.get_task(Uuid::new_v4(), alice), Err(DataError::NotFound(_))));

        // Still intact for the real owner.
        assert_eq!(db.ctx.get_task(task.id, alice).unwrap().title, "private");
    }

    #[test]
    fn update_is_a_merge_patch() {
        let db = temp_db("patch");
        let owner = Uuid::new_v4();
        let task = create(
            &db.ctx,
            CreateTaskRequest {
                title: "Draft essay".into(),
                description: Some("Outline first".into()),
                tags: vec!["writing".into()],
                ..Default::default()
            },
            owner,
        );

        let updated = db
            .ctx
            .update_task(
                task.id,
                owner,
                UpdateTaskRequest {
                    status: Patch::Set(TaskStatus::Done),
                    ..Default::default()
                },
            )
            .unwrap();

        let fetched = db.ctx.get_task(task.id, owner).unwrap();
        assert_eq!(fetched, updated);
        assert_eq!(fetched.status, TaskStatus::Done);
        assert_eq!(fetched.title, "Draft essay");
        assert_eq!(fetched.description.as_deref(), Some("Outline first"));
        assert_eq!(fetched.tags, vec!["writing".to_string()]);
        assert!(fetched.updated_at > fetched.created_at);
    }

    #[test]
    fn delete_cascades_through_descendants() {
        let db = temp_db("cascade");
        let owner = Uuid::new_v4();
        let root = create(&db.ctx, request("root"), owner);
        let child = create(&db.ctx, child_of("child", root.id), owner);
        create(&db.ctx, child_of("grandchild", child.id), owner);
        create(&db.ctx, child_of("second child", root.id), owner);
        let unrelated = create(&db.ctx, request("unrelated"), owner);

        let removed = db.ctx.delete_task(root.id, owner).unwrap();
        assert_eq!(removed.len(), 4);
        assert_eq!(removed.last(), Some(&root.id));
        assert!(!removed.contains(&unrelated.id));

        let left: Vec<Uuid> = db.ctx.list_tasks(owner).unwrap().iter().map(|t| t.id).collect();
        assert_eq!(left, vec![unrelated.id]);
        assert!(matches!(db.ctx.delete_task(root.id, owner), Err(DataError::NotFound(_))));
    }

    #[test]
    fn parent_must_exist_under_same_owner() {
        let db = temp_db("parent_owner");
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let bobs = create(&db.ctx, request("bob's"), bob);

        let result = db.ctx.create_task(child_of("sneaky", bobs.id), alice, |_| {});
        assert!(matches!(result, Err(DataError::Invalid(_))));

        let result = db.ctx.create_task(child_of("orphan", Uuid::new_v4()), alice, |_| {});
        assert!(matches!(result, Err(DataError::Invalid(_))));
        assert_eq!(db.ctx.count_tasks(alice).unwrap(), 0);
    }

    #[test]
    fn parent_cycles_are_rejected() {
        let db = temp_db("cycle");
        let owner = Uuid::new_v4();
        let a = create(&db.ctx, request("a"), owner);
        let b = create(&db.ctx, child_of("b", a.id), owner);
        let c = create(&db.ctx, child_of("c", b.id), owner);

        let to_self = UpdateTaskRequest {
            parent_task_id: Patch::Set(a.id),
            ..Default::default()
        };
        assert!(matches!(db.ctx.update_task(a.id, owner, to_self), Err(DataError::Invalid(_))));

        let to_grandchild = UpdateTaskRequest {
            parent_task_id: Patch::Set(c.id),
            ..Default::default()
        };
        assert!(matches!(
            db.ctx.update_task(a.id, owner, to_grandchild),
            Err(DataError::Invalid(_))
        ));

        // Detaching is always fine.
        let detach = UpdateTaskRequest {
            parent_task_id: Patch::Clear,
            ..Default::default()
        };
        let c = db.ctx.update_task(c.id, owner, detach).unwrap();
        assert_eq!(c.parent_task_id, None);
    }

    #[test]
    fn completion_rate_bounds() {
        let db = temp_db("rate");
        let owner = Uuid::new_v4();
        assert_eq!(db.ctx.completion_rate(owner).unwrap(), 0.0);

        let done = create(&db.ctx, request("done"), owner);
        create(&db.ctx, request("open"), owner);
        create(&db.ctx, request("also open"), owner);
        db.ctx
            .update_task(
                done.id,
                owner,
                UpdateTaskRequest {
                    status: Patch::Set(TaskStatus::Done),
                    ..Default::default()
                },
            )
            .unwrap();

        let rate = db.ctx.completion_rate(owner).unwrap();
        assert!((rate - 1.0 / 3.0).abs() < 1e-9);
        assert!((0.0..=1.0).contains(&rate));
        assert_eq!(db.ctx.completion_rate(Uuid::new_v4()).unwrap(), 0.0);
    }

    #[test]
    fn record_estimate_persists_minutes_and_confidence() {
        let db = temp_db("estimate");
        let owner = Uuid::new_v4();
        let task = create(&db.ctx, request("estimate me"), owner);

        db.ctx.record_estimate(task.id, owner, 56, 0.75).unwrap();
        let fetched = db.ctx.get_task(task.id, owner).unwrap();
        assert_eq!(fetched.estimated_minutes, 56);
        assert_eq!(fetched.estimate_confidence, Some(0.75));
    }

    #[test]
    fn usernames_and_emails_are_unique() {
        let db = temp_db("users");
        let ada = user("ada", "ada@example.com");
        db.ctx.create_user(&ada).unwrap();

        let same_name = user("ada", "other@example.com");
        assert!(matches!(db.ctx.create_user(&same_name), Err(DataError::Conflict(_))));

        let same_email = user("ada2", "ADA@example.com");
        assert!(matches!(db.ctx.create_user(&same_email), Err(DataError::Conflict(_))));

        let found = db.ctx.get_user_by_username("ada").unwrap().unwrap();
        assert_eq!(found.id, ada.id);
        assert_eq!(db.ctx.get_user(ada.id).unwrap().unwrap().email, "ada@example.com");
        assert!(db.ctx.get_user_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn subtree_terminates_on_cyclic_rows() {
        let owner = Uuid::new_v4();
        let mut a = Task::new(request("a"), owner);
        let mut b = Task::new(request("b"), owner);
        a.parent_task_id = Some(b.id);
        b.parent_task_id = Some(a.id);

        let doomed = subtree(a.id, &[a.clone(), b.clone()]);
        assert_eq!(doomed.len(), 2);
        assert!(doomed.contains(&a.id) && doomed.contains(&b.id));
    }
}
