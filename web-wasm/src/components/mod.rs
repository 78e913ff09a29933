pub mod header;
pub mod toast;
pub mod confirm_dialog;
pub mod modal_frame;
pub mod job_modal;
pub mod candidate_modal;
pub mod job_table;
pub mod job_search;
pub mod apply_modal;
pub mod applications_modal;
pub mod job_details_modal;
pub mod progress_circle;
pub mod post_job_modal;
pub mod candidate_list;
