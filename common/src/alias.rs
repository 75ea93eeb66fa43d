//! 工资项目名称规范化
//!
//! 不同单位的工资表对同一工资项目写法不一，按固定顺序做同义替换，
//! 使其与模板文件B中的项目名称一致。

/// 一条子串替换规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynonymRule {
    pub from: &'static str,
    pub to: &'static str,
}

impl SynonymRule {
    const fn new(from: &'static str, to: &'static str) -> Self {
        Self { from, to }
    }

    fn applies_to(&self, label: &str) -> bool {
        label.contains(self.from)
    }

    fn rewrite(&self, label: &str) -> String {
        label.replace(self.from, self.to)
    }
}

/// 无条件规则：命中即替换，与后续规则无关
pub const UNCONDITIONAL_RULES: &[SynonymRule] = &[
    SynonymRule::new("绩效工资", "基础性绩效"),
];

/// 互斥规则：按顺序检查，只应用第一条命中的
pub const EXCLUSIVE_RULES: &[SynonymRule] = &[
    SynonymRule::new("行政医疗", "职工基本医疗（行政）"),
    SynonymRule::new("事业医疗", "基本医疗（事业）"),
    SynonymRule::new("医疗保险", "基本医疗"),
];

/// 规范化工资项目名称
///
/// 替换前后都会去除首尾空白。只含一个医疗类触发词时结果幂等；
/// 同时含两个不同触发词时，第二次规范化还会替换剩下的那个。
pub fn normalize_label(label: &str) -> String {
    let mut label = label.trim().to_string();

    for rule in UNCONDITIONAL_RULES {
        if rule.applies_to(&label) {
            label = rule.rewrite(&label);
        }
    }

    if let Some(rule) = EXCLUSIVE_RULES.iter().find(|r| r.applies_to(&label)) {
        label = rule.rewrite(&label);
    }

    label.trim().to_string()
}
