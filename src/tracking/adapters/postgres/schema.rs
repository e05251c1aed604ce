//! Diesel schema for project and task persistence.

diesel::table! {
    /// Projects grouping tasks.
    projects (id) {
        /// Storage-assigned identifier.
        id -> Int8,
        /// Unique project title.
        #[max_length = 50]
        title -> Varchar,
        /// Optional free-text description.
        #[max_length = 100]
        description -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks owned by a project.
    tasks (id) {
        /// Storage-assigned identifier.
        id -> Int8,
        /// Owning project; deleting the project deletes its tasks.
        project_id -> Int8,
        /// Task title.
        #[max_length = 80]
        title -> Varchar,
        /// Optional free-text description.
        #[max_length = 300]
        description -> Nullable<Varchar>,
        /// Optional calendar due date.
        due_date -> Nullable<Date>,
        /// Lifecycle status.
        #[max_length = 16]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> projects (project_id));
diesel::allow_tables_to_appear_in_same_query!(projects, tasks);
