//! Service layer for task assignment, the status workflow and task listings.

use crate::auth::domain::{AccessError, Session};
use crate::task::{
    domain::{
        NewTaskData, Task, TaskDescription, TaskDomainError, TaskFilter, TaskId, TaskLocation,
        TaskStatus, TaskTitle, TaskView, attach_summaries, today,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for assigning a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignTaskRequest {
    title: String,
    description: String,
    location: String,
    due_date: NaiveDate,
    assignee: UserId,
    assigner: Option<UserId>,
}

impl AssignTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        due_date: NaiveDate,
        assignee: UserId,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            location: location.into(),
            due_date,
            assignee,
            assigner: None,
        }
    }

    /// Records the task as issued by `assigner`. Only the master-admin may
    /// assign on behalf of another account, and that account must be an
    /// admin.
    #[must_use]
    pub const fn on_behalf_of(mut self, assigner: UserId) -> Self {
        self.assigner = Some(assigner);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The session may not perform the operation.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// A referenced account does not exist.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// User repository operation failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<T, U, C> TaskLifecycleService<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            users,
            clock,
        }
    }

    /// Assigns a new task in `pending` status.
    ///
    /// Admins assign as themselves to accounts of their own department. The
    /// master-admin may assign across departments and name another admin as
    /// the assigner.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for invalid fields, a location
    /// without coordinates or a due date before today,
    /// [`TaskLifecycleError::Access`] when the caller may not assign to the
    /// account or names a non-admin assigner, and
    /// [`TaskLifecycleError::UnknownUser`] for missing accounts.
    pub async fn assign(
        &self,
        session: &Session,
        request: AssignTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        self.assign_task(session, request)
            .await
            .inspect_err(|err| log_failure("assign", session, err))
    }

    async fn assign_task(
        &self,
        session: &Session,
        request: AssignTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        session.require_admin()?;

        let title = TaskTitle::new(request.title)?;
        let description = TaskDescription::new(request.description)?;
        let location = TaskLocation::with_coordinates(request.location)?;
        let current_date = today(&*self.clock);
        if request.due_date < current_date {
            return Err(TaskDomainError::DueDateInPast {
                due_date: request.due_date,
                today: current_date,
            }
            .into());
        }

        let assignee = self.require_user(request.assignee).await?;
        let assigner = match request.assigner {
            Some(assigner) if assigner != session.user_id() => {
                session.require_master_admin()?;
                let named = self.require_user(assigner).await?;
                if !named.role().is_admin_or_above() {
                    return Err(AccessError::AssignerNotAdmin(named.id()).into());
                }
                named.id()
            }
            _ => session.user_id(),
        };
        session.require_same_department(&assignee)?;

        let task = Task::new(
            NewTaskData {
                title,
                description,
                assigned_by: assigner,
                assigned_to: assignee.id(),
                location,
                due_date: request.due_date,
            },
            &*self.clock,
        );
        self.tasks.store(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            assigned_by = %assigner,
            assigned_to = %assignee.id(),
            "task assigned"
        );
        Ok(task)
    }

    /// Starts work on a task: `pending → in_progress`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotAssignee`] when the caller is neither the
    /// assignee nor the master-admin, and
    /// [`TaskDomainError::InvalidStateTransition`] unless the task is
    /// pending.
    pub async fn start(&self, session: &Session, id: TaskId) -> TaskLifecycleResult<Task> {
        self.apply(session, id, "start", |task, clock| {
            if !session.is_master_admin() && task.assigned_to() != session.user_id() {
                return Err(AccessError::NotAssignee.into());
            }
            Ok(task.start(clock)?)
        })
        .await
    }

    /// Approves finished work: `in_progress → completed`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotAssigner`] when the caller is neither the
    /// assigning admin nor the master-admin, and
    /// [`TaskDomainError::InvalidStateTransition`] unless the task is in
    /// progress.
    pub async fn approve(&self, session: &Session, id: TaskId) -> TaskLifecycleResult<Task> {
        self.apply(session, id, "approve", |task, clock| {
            require_assigner(session, task)?;
            Ok(task.approve(clock)?)
        })
        .await
    }

    /// Sends work back to the assignee: `in_progress → pending`.
    ///
    /// # Errors
    ///
    /// As [`Self::approve`].
    pub async fn reject(&self, session: &Session, id: TaskId) -> TaskLifecycleResult<Task> {
        self.apply(session, id, "reject", |task, clock| {
            require_assigner(session, task)?;
            Ok(task.reject(clock)?)
        })
        .await
    }

    /// Sets any status without consulting the workflow.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MasterAdminRequired`] for everyone but the
    /// master-admin.
    pub async fn set_status(
        &self,
        session: &Session,
        id: TaskId,
        status: TaskStatus,
    ) -> TaskLifecycleResult<Task> {
        self.apply(session, id, "set_status", |task, clock| {
            session.require_master_admin()?;
            task.override_status(status, clock);
            Ok(())
        })
        .await
    }

    /// Lists the caller's assigned tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when a repository read fails.
    pub async fn tasks_for_assignee(
        &self,
        session: &Session,
        filter: &TaskFilter,
    ) -> TaskLifecycleResult<Vec<TaskView>> {
        self.list_for_assignee(session, filter)
            .await
            .inspect_err(|err| log_failure("tasks_for_assignee", session, err))
    }

    /// Lists the tasks the calling admin has issued.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::AdminRequired`] for ordinary users.
    pub async fn tasks_assigned_by(
        &self,
        session: &Session,
        filter: &TaskFilter,
    ) -> TaskLifecycleResult<Vec<TaskView>> {
        self.list_assigned_by(session, filter)
            .await
            .inspect_err(|err| log_failure("tasks_assigned_by", session, err))
    }

    /// Lists the calling admin's issued tasks that wait for review.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::AdminRequired`] for ordinary users.
    pub async fn awaiting_review(&self, session: &Session) -> TaskLifecycleResult<Vec<TaskView>> {
        let filter = TaskFilter::all().with_status(TaskStatus::InProgress);
        self.tasks_assigned_by(session, &filter).await
    }

    /// Lists every task with embedded user summaries.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MasterAdminRequired`] for everyone but the
    /// master-admin.
    pub async fn all_tasks(
        &self,
        session: &Session,
        filter: &TaskFilter,
    ) -> TaskLifecycleResult<Vec<TaskView>> {
        self.list_all(session, filter)
            .await
            .inspect_err(|err| log_failure("all_tasks", session, err))
    }

    async fn apply<F>(
        &self,
        session: &Session,
        id: TaskId,
        operation: &'static str,
        change: F,
    ) -> TaskLifecycleResult<Task>
    where
        F: FnOnce(&mut Task, &C) -> TaskLifecycleResult<()> + Send,
    {
        self.change_task(id, operation, change)
            .await
            .inspect_err(|err| log_failure(operation, session, err))
    }

    async fn change_task<F>(
        &self,
        id: TaskId,
        operation: &'static str,
        change: F,
    ) -> TaskLifecycleResult<Task>
    where
        F: FnOnce(&mut Task, &C) -> TaskLifecycleResult<()> + Send,
    {
        let mut task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(id))?;
        let previous = task.status();
        change(&mut task, &*self.clock)?;
        self.tasks.update(&task).await?;
        tracing::info!(
            task_id = %id,
            from = %previous,
            to = %task.status(),
            operation,
            "task status changed"
        );
        Ok(task)
    }

    async fn list_for_assignee(
        &self,
        session: &Session,
        filter: &TaskFilter,
    ) -> TaskLifecycleResult<Vec<TaskView>> {
        let tasks = self.tasks.list_assigned_to(session.user_id()).await?;
        self.views(tasks, filter).await
    }

    async fn list_assigned_by(
        &self,
        session: &Session,
        filter: &TaskFilter,
    ) -> TaskLifecycleResult<Vec<TaskView>> {
        session.require_admin()?;
        let tasks = self.tasks.list_assigned_by(session.user_id()).await?;
        self.views(tasks, filter).await
    }

    async fn list_all(
        &self,
        session: &Session,
        filter: &TaskFilter,
    ) -> TaskLifecycleResult<Vec<TaskView>> {
        session.require_master_admin()?;
        let tasks = self.tasks.list_all().await?;
        self.views(tasks, filter).await
    }

    async fn require_user(&self, id: UserId) -> TaskLifecycleResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::UnknownUser(id))
    }

    async fn views(
        &self,
        tasks: Vec<Task>,
        filter: &TaskFilter,
    ) -> TaskLifecycleResult<Vec<TaskView>> {
        let users = self.users.list_all().await?;
        let mut views = attach_summaries(tasks, &users);
        views.retain(|view| filter.accepts(view));
        Ok(views)
    }
}

fn require_assigner(session: &Session, task: &Task) -> TaskLifecycleResult<()> {
    session.require_admin()?;
    if session.is_master_admin() || task.assigned_by() == session.user_id() {
        Ok(())
    } else {
        Err(AccessError::NotAssigner.into())
    }
}

fn log_failure(operation: &'static str, session: &Session, err: &TaskLifecycleError) {
    tracing::warn!(
        operation,
        user_id = %session.user_id(),
        error = %err,
        "task operation failed"
    );
}
