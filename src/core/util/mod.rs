pub mod k8s_name_util;
pub mod quantity_util;
