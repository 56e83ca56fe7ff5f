use crate::project::Project;
use crate::resource::ResourcePoolItem;
use crate::task::Task;
use std::collections::HashSet;
use std::fmt;

/// Boundary validation failure. The engine's algorithms assume validated
/// input, so callers ingesting external data should run these checks first.
#[derive(Debug, Clone)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = Result<T, ValidationError>;

pub fn validate_task(task: &Task) -> ValidationResult<()> {
    if task.id.trim().is_empty() {
        return Err(ValidationError::new("task requires a non-empty id"));
    }

    if task.end_date < task.start_date {
        return Err(ValidationError::new(format!(
            "task {} has end date {} before start date {}",
            task.id, task.end_date, task.start_date
        )));
    }

    if task.assignee.trim().is_empty() {
        return Err(ValidationError::new(format!(
            "task {} requires a non-empty assignee",
            task.id
        )));
    }

    Ok(())
}

pub fn validate_task_collection(tasks: &[Task]) -> ValidationResult<()> {
    let mut seen_ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen_ids.insert(task.id.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate task id {}",
                task.id
            )));
        }
        validate_task(task)?;
    }
    Ok(())
}

pub fn validate_project(project: &Project) -> ValidationResult<()> {
    if project.id.trim().is_empty() {
        return Err(ValidationError::new("project requires a non-empty id"));
    }

    if project.end_date < project.start_date {
        return Err(ValidationError::new(format!(
            "project {} has end date {} before start date {}",
            project.id, project.end_date, project.start_date
        )));
    }

    for requirement in &project.resource_requirements {
        if requirement.resource_id.trim().is_empty() {
            return Err(ValidationError::new(format!(
                "project {} has a resource requirement with an empty resource id",
                project.id
            )));
        }
        if requirement.required_count < 0 {
            return Err(ValidationError::new(format!(
                "project {} requires a negative count {} of resource {}",
                project.id, requirement.required_count, requirement.resource_id
            )));
        }
    }

    validate_task_collection(&project.tasks)
}

pub fn validate_project_collection(projects: &[Project]) -> ValidationResult<()> {
    let mut seen_ids = HashSet::with_capacity(projects.len());
    for project in projects {
        if !seen_ids.insert(project.id.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate project id {}",
                project.id
            )));
        }
        validate_project(project)?;
    }
    Ok(())
}

pub fn validate_resource_pool(pool: &[ResourcePoolItem]) -> ValidationResult<()> {
    let mut seen_ids = HashSet::with_capacity(pool.len());
    for item in pool {
        if item.id.trim().is_empty() {
            return Err(ValidationError::new(
                "resource pool item requires a non-empty id",
            ));
        }
        if !seen_ids.insert(item.id.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate resource pool id {}",
                item.id
            )));
        }
        if item.total_quantity <= 0 {
            return Err(ValidationError::new(format!(
                "resource {} has non-positive capacity {}",
                item.id, item.total_quantity
            )));
        }
    }
    Ok(())
}
